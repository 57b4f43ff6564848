//! Evaluation pipeline for programming exercises.
//!
//! A learner's source is assembled into an ordered file set ([`request`]),
//! executed on a remote sandbox ([`client`]), and the captured output is
//! graded against the question's test cases ([`evaluate`]). The available
//! runtimes are tracked per editing session ([`catalog`]) and the whole
//! round trip is orchestrated by [`session::ExerciseSession`].

pub mod catalog;
pub mod client;
pub mod error;
pub mod evaluate;
pub mod request;
pub mod session;

pub use catalog::RuntimeCatalog;
pub use client::SandboxClient;
pub use error::ExecError;
pub use session::{ExerciseSession, RunOutcome};
