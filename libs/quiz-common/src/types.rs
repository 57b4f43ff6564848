//! Wire contract of the remote execution sandbox.
//!
//! Field names and semantics follow the sandbox API and must not drift:
//! the first file of a request is the entry point, `run.code == 0` is the
//! only success signal, and stage timeouts show up as a `signal` inside the
//! result rather than as a transport failure.

use serde::{Deserialize, Serialize};

/// A single source file shipped to the sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PistonFile {
    pub name: String,
    pub content: String,
}

impl PistonFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

fn default_compile_timeout() -> u64 {
    10_000
}

fn default_run_timeout() -> u64 {
    3_000
}

fn default_memory_limit() -> i64 {
    -1
}

/// Request body for the sandbox execute endpoint.
///
/// `files` is ordered; the sandbox runs the first entry as the program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub language: String,
    /// Exact version or SemVer selector of the runtime to use.
    pub version: String,
    pub files: Vec<PistonFile>,
    /// Text passed as stdin to the program. Defaults to the empty string.
    #[serde(default)]
    pub stdin: String,
    /// Arguments passed to the program. Defaults to none.
    #[serde(default)]
    pub args: Vec<String>,
    /// Compile stage wall-clock limit in milliseconds.
    #[serde(default = "default_compile_timeout")]
    pub compile_timeout: u64,
    /// Run stage wall-clock limit in milliseconds.
    #[serde(default = "default_run_timeout")]
    pub run_timeout: u64,
    /// Compile stage memory limit in bytes, -1 for unlimited.
    #[serde(default = "default_memory_limit")]
    pub compile_memory_limit: i64,
    /// Run stage memory limit in bytes, -1 for unlimited.
    #[serde(default = "default_memory_limit")]
    pub run_memory_limit: i64,
}

impl ExecuteRequest {
    pub fn new(
        language: impl Into<String>,
        version: impl Into<String>,
        files: Vec<PistonFile>,
    ) -> Self {
        Self {
            language: language.into(),
            version: version.into(),
            files,
            stdin: String::new(),
            args: Vec::new(),
            compile_timeout: default_compile_timeout(),
            run_timeout: default_run_timeout(),
            compile_memory_limit: default_memory_limit(),
            run_memory_limit: default_memory_limit(),
        }
    }
}

/// Captured output of one sandbox stage (compile or run).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub stdout: String,
    pub stderr: String,
    /// stdout and stderr interleaved in arrival order.
    pub output: String,
    /// Process exit status. `None` when the stage was killed by a signal,
    /// e.g. after exceeding its time limit.
    pub code: Option<i32>,
    pub signal: Option<String>,
}

impl Output {
    /// Whether the stage ran to completion with exit status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Response body of the sandbox execute endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    /// Name (not alias) of the runtime that was used.
    pub language: String,
    /// Version of the runtime that was used.
    pub version: String,
    /// Results of the run stage.
    pub run: Output,
    /// Results of the compile stage; only present for compiled languages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile: Option<Output>,
}

impl ExecuteResponse {
    /// True when a compile stage exists and did not exit cleanly. The run
    /// stage result must not be trusted for grading in that case.
    pub fn compile_failed(&self) -> bool {
        match &self.compile {
            Some(compile) => !compile.success(),
            None => false,
        }
    }
}

/// A runtime currently installed on the sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runtime {
    pub language: String,
    pub version: String,
}
