//! Per-learner editing session for one programming question.
//!
//! The session owns the mutable answer state (`code`, `stdout`) and is the
//! single place where gate, request building, execution and grading are
//! chained. `run` takes `&mut self`, so two runs of the same session cannot
//! overlap and race on the answer; unrelated sessions execute on the sandbox
//! fully in parallel.

use quiz_common::question::{ProgrammingAnswer, ProgrammingEvaluation, ProgrammingQuestion};
use quiz_common::types::ExecuteResponse;

use crate::catalog::RuntimeCatalog;
use crate::client::SandboxClient;
use crate::error::ExecError;
use crate::evaluate::evaluate_programming;
use crate::request::build_execute_request;

/// Result of one run action: the raw sandbox response plus the fresh
/// evaluation derived from it.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub response: ExecuteResponse,
    pub evaluation: ProgrammingEvaluation,
}

impl RunOutcome {
    /// Whether the output should be rendered error-styled. Program failure
    /// is domain data, not a pipeline error.
    pub fn is_error(&self) -> bool {
        !self.response.run.success()
    }

    /// Whether the compile stage failed. The run stage result is not
    /// trustworthy for grading in that case.
    pub fn compile_failed(&self) -> bool {
        self.response.compile_failed()
    }
}

pub struct ExerciseSession {
    question: ProgrammingQuestion,
    catalog: RuntimeCatalog,
    answer: ProgrammingAnswer,
    evaluation: Option<ProgrammingEvaluation>,
}

impl ExerciseSession {
    /// Start a session with an already-fetched runtime catalog. The answer
    /// starts as the question's solution template with empty output.
    pub fn new(question: ProgrammingQuestion, catalog: RuntimeCatalog) -> Self {
        let answer = ProgrammingAnswer {
            code: question.custom.solution_template().to_string(),
            stdout: String::new(),
        };
        Self {
            question,
            catalog,
            answer,
            evaluation: None,
        }
    }

    /// Start a session, querying the catalog once. Sessions do not refresh
    /// the catalog afterwards; staleness surfaces at execution time.
    pub async fn open(
        question: ProgrammingQuestion,
        client: &SandboxClient,
    ) -> Result<Self, ExecError> {
        let catalog = RuntimeCatalog::fetch(client).await?;
        Ok(Self::new(question, catalog))
    }

    /// Replace the learner's current source.
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.answer.code = code.into();
    }

    pub fn answer(&self) -> &ProgrammingAnswer {
        &self.answer
    }

    /// Evaluation of the most recent run, if any.
    pub fn evaluation(&self) -> Option<&ProgrammingEvaluation> {
        self.evaluation.as_ref()
    }

    /// Resolved runtime version for this question's language, `None` when
    /// the language is not installed.
    pub fn version(&self) -> Option<&str> {
        self.catalog.version_for(self.question.language)
    }

    /// Execute the current source and grade the captured output.
    ///
    /// The language is gated against the catalog before any remote call.
    /// On success the answer's `stdout` is overwritten with the combined run
    /// output and the evaluation is replaced wholesale. On failure the
    /// answer and the previous evaluation stay untouched and the error is
    /// returned for display; no automatic retry.
    pub async fn run(&mut self, client: &SandboxClient) -> Result<RunOutcome, ExecError> {
        let language = self.question.language;
        let version = self
            .catalog
            .version_for(language)
            .ok_or(ExecError::RuntimeUnavailable(language))?
            .to_string();

        let request = build_execute_request(&self.question, &self.answer.code, &version);

        tracing::info!(
            question_id = %self.question.question_id,
            language = %language,
            version = %version,
            "Executing learner submission"
        );

        let response = client.execute(&request).await?;

        if response.compile_failed() {
            tracing::warn!(
                question_id = %self.question.question_id,
                "Compile stage failed; run output is not meaningful"
            );
        }

        self.answer.stdout = response.run.output.clone();

        let evaluation = evaluate_programming(&self.question, &self.answer);
        self.evaluation = Some(evaluation.clone());

        Ok(RunOutcome {
            response,
            evaluation,
        })
    }
}
