pub mod language;
pub mod question;
pub mod types;
