//! Quiz content model shared between authoring, grading and the UI.
//!
//! Question, answer and evaluation are parallel discriminated unions keyed by
//! the question-type tag. The CMS stores this content as camelCase JSON, so
//! every struct renames its fields accordingly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::language::Language;

/// One expected input/output pair of a programming question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub title: String,
    #[serde(default)]
    pub input: String,
    /// Expected output as an ordered sequence of lines.
    pub expected_output: Vec<String>,
}

/// Mode-specific configuration of a programming question.
///
/// `callable` questions ship a harness that invokes the learner's solution;
/// the harness is required by construction, so a callable question without a
/// main file cannot be represented.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ProgrammingConfig {
    /// The solution is the entire program.
    #[serde(rename_all = "camelCase")]
    Standalone { solution_template: String },
    /// The solution is invoked by a provided main file.
    #[serde(rename_all = "camelCase")]
    Callable {
        solution_template: String,
        main_file: String,
    },
}

impl ProgrammingConfig {
    /// Starter source shown to the learner.
    pub fn solution_template(&self) -> &str {
        match self {
            ProgrammingConfig::Standalone { solution_template } => solution_template,
            ProgrammingConfig::Callable {
                solution_template, ..
            } => solution_template,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammingQuestion {
    pub question_id: Uuid,
    #[serde(default)]
    pub statement: String,
    pub language: Language,
    pub custom: ProgrammingConfig,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceOption {
    pub answer_id: Uuid,
    pub content: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceQuestion {
    pub question_id: Uuid,
    #[serde(default)]
    pub statement: String,
    pub answers: Vec<MultipleChoiceOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedAnswer {
    pub accepted_answer_id: Uuid,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortTextQuestion {
    pub question_id: Uuid,
    #[serde(default)]
    pub statement: String,
    pub accepted_answers: Vec<AcceptedAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextQuestion {
    pub question_id: Uuid,
    #[serde(default)]
    pub statement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VorwissenQuestion {
    pub question_id: Uuid,
    #[serde(default)]
    pub statement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeQuestion {
    pub question_id: Uuid,
    #[serde(default)]
    pub cloze_text: String,
}

/// The closed set of question types.
///
/// Grading and initial-answer construction match exhaustively on this enum,
/// so adding a variant here fails the build until every operation handles it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuizQuestion {
    MultipleChoice(MultipleChoiceQuestion),
    ShortText(ShortTextQuestion),
    Text(TextQuestion),
    Vorwissen(VorwissenQuestion),
    Programming(ProgrammingQuestion),
    Cloze(ClozeQuestion),
}

impl QuizQuestion {
    pub fn type_key(&self) -> &'static str {
        match self {
            QuizQuestion::MultipleChoice(_) => "multiple-choice",
            QuizQuestion::ShortText(_) => "short-text",
            QuizQuestion::Text(_) => "text",
            QuizQuestion::Vorwissen(_) => "vorwissen",
            QuizQuestion::Programming(_) => "programming",
            QuizQuestion::Cloze(_) => "cloze",
        }
    }

    pub fn question_id(&self) -> Uuid {
        match self {
            QuizQuestion::MultipleChoice(q) => q.question_id,
            QuizQuestion::ShortText(q) => q.question_id,
            QuizQuestion::Text(q) => q.question_id,
            QuizQuestion::Vorwissen(q) => q.question_id,
            QuizQuestion::Programming(q) => q.question_id,
            QuizQuestion::Cloze(q) => q.question_id,
        }
    }
}

/// Learner state for a programming question.
///
/// `stdout` holds the combined output of the most recent execution and is
/// overwritten on every run, never appended to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammingAnswer {
    pub code: String,
    pub stdout: String,
}

/// Learner answers, parallel to [`QuizQuestion`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuizAnswer {
    MultipleChoice {
        /// Checked state per answer option; a missing key means unchecked.
        value: HashMap<Uuid, bool>,
    },
    ShortText {
        value: String,
    },
    Text {
        value: String,
    },
    Vorwissen {
        value: String,
    },
    Programming {
        value: ProgrammingAnswer,
    },
    Cloze {
        value: String,
    },
}

impl QuizAnswer {
    pub fn type_key(&self) -> &'static str {
        match self {
            QuizAnswer::MultipleChoice { .. } => "multiple-choice",
            QuizAnswer::ShortText { .. } => "short-text",
            QuizAnswer::Text { .. } => "text",
            QuizAnswer::Vorwissen { .. } => "vorwissen",
            QuizAnswer::Programming { .. } => "programming",
            QuizAnswer::Cloze { .. } => "cloze",
        }
    }
}

/// Per-test-case grading outcome of a programming question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseResult {
    pub title: String,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub verdict: bool,
}

/// Aggregate pass state, derived from the verdicts and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
    /// No test cases exist, so there is nothing to pass or fail.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammingEvaluation {
    /// Mirrors the question's test cases in their original order.
    pub test_cases: Vec<TestCaseResult>,
}

impl ProgrammingEvaluation {
    pub fn overall(&self) -> Verdict {
        if self.test_cases.is_empty() {
            Verdict::Unknown
        } else if self.test_cases.iter().all(|tc| tc.verdict) {
            Verdict::Passed
        } else {
            Verdict::Failed
        }
    }

    /// First failing test case in original order, surfaced prominently by
    /// the UI.
    pub fn first_failed(&self) -> Option<(usize, &TestCaseResult)> {
        self.test_cases
            .iter()
            .enumerate()
            .find(|(_, tc)| !tc.verdict)
    }
}

/// Grading outcome, parallel to [`QuizQuestion`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Evaluation {
    /// The question type has no automatic grader. Distinct from both pass
    /// and fail: the submission simply cannot be graded.
    NotImplemented,
    MultipleChoice { is_correct: bool },
    ShortText { is_correct: bool },
    Programming(ProgrammingEvaluation),
}
