//! HTTP client for the remote execution sandbox.
//!
//! One remote call per invocation: no caching, no retries, no client-side
//! timeout. Stage time limits travel inside the request and are enforced by
//! the sandbox, which reports them through the result's `signal` field.

use quiz_common::types::{ExecuteRequest, ExecuteResponse, Runtime};

use crate::error::ExecError;

#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: reqwest::Client,
    base_url: String,
}

impl SandboxClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Execute a request on the sandbox.
    ///
    /// A nonzero `run.code` in the response is not an error of this client;
    /// it is program output and still flows into grading.
    pub async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, ExecError> {
        let url = format!("{}/api/v2/execute", self.base_url);

        tracing::debug!(
            language = %request.language,
            version = %request.version,
            files = request.files.len(),
            "Submitting execution request"
        );

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Sandbox rejected execution request");
            return Err(ExecError::Sandbox {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ExecError::Protocol(format!("invalid execute response: {}", e)))
    }

    /// Query the runtimes currently installed on the sandbox.
    pub async fn runtimes(&self) -> Result<Vec<Runtime>, ExecError> {
        let url = format!("{}/api/v2/runtimes", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ExecError::Sandbox {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ExecError::Protocol(format!("invalid runtimes response: {}", e)))
    }
}
