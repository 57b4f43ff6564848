use serde::{Deserialize, Serialize};
use std::fmt;

/// Programming languages a question may be authored in.
///
/// This is a closed set: the execution server may know more runtimes, but
/// only these can be attached to a programming question, because the request
/// builder needs a file extension for each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Typescript,
    Javascript,
    Python,
}

impl Language {
    /// File extension used when naming the files sent to the sandbox.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Typescript => "ts",
            Language::Javascript => "js",
            Language::Python => "py",
        }
    }

    /// Key used on the wire and in the runtime catalog.
    pub fn key(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Typescript => "typescript",
            Language::Javascript => "javascript",
            Language::Python => "python",
        }
    }

}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A language key that is not part of the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language \"{}\"", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl std::str::FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "java" => Ok(Language::Java),
            "typescript" => Ok(Language::Typescript),
            "javascript" => Ok(Language::Javascript),
            "python" => Ok(Language::Python),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}
