//! Snapshot of the runtimes installed on the sandbox.
//!
//! Queried once per editing session and never invalidated. A stale entry is
//! acceptable: execution with a runtime that disappeared in the meantime
//! fails as a normal client error, it is not prevented here.

use quiz_common::language::Language;
use quiz_common::types::Runtime;

use crate::client::SandboxClient;
use crate::error::ExecError;

#[derive(Debug, Clone, Default)]
pub struct RuntimeCatalog {
    runtimes: Vec<Runtime>,
}

impl RuntimeCatalog {
    pub fn new(runtimes: Vec<Runtime>) -> Self {
        Self { runtimes }
    }

    /// Query the sandbox for its current runtimes.
    pub async fn fetch(client: &SandboxClient) -> Result<Self, ExecError> {
        let runtimes = client.runtimes().await?;
        tracing::debug!(count = runtimes.len(), "Fetched runtime catalog");
        Ok(Self::new(runtimes))
    }

    /// Resolve the installed version for a language, `None` if the language
    /// is not currently installed.
    pub fn version_for(&self, language: Language) -> Option<&str> {
        self.runtimes
            .iter()
            .find(|r| r.language == language.key())
            .map(|r| r.version.as_str())
    }

    pub fn runtimes(&self) -> &[Runtime] {
        &self.runtimes
    }
}
