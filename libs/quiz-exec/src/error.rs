use quiz_common::language::Language;
use thiserror::Error;

/// Failures of the execution pipeline.
///
/// A program that ran but exited nonzero is not represented here: that is
/// domain data carried in the execution result and still flows into grading.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The runtime catalog has no version for the requested language. Raised
    /// before any remote call; resolving it requires installing the language
    /// on the sandbox.
    #[error("language \"{0}\" is not available; the execution server might be offline or the language is not installed")]
    RuntimeUnavailable(Language),

    /// The remote call could not be completed. Recoverable by resubmitting.
    #[error("execution server could not be reached: {0}")]
    Transport(#[from] reqwest::Error),

    /// The sandbox answered with a non-success status.
    #[error("execution server returned status {status}: {message}")]
    Sandbox { status: u16, message: String },

    /// The sandbox answered 2xx but the body did not match the wire contract.
    #[error("malformed execution server response: {0}")]
    Protocol(String),
}
