//! Grading logic for quiz submissions.
//!
//! Pure functions from `(question, answer)` to an evaluation. The dispatch
//! matches exhaustively on the question-type union, so a new question type
//! does not build until it is wired up here. Question types without an
//! automatic grader return the explicit [`Evaluation::NotImplemented`]
//! marker, which callers must keep distinct from pass and fail.

use std::collections::HashMap;
use uuid::Uuid;

use quiz_common::question::{
    Evaluation, MultipleChoiceQuestion, ProgrammingAnswer, ProgrammingEvaluation,
    ProgrammingQuestion, QuizAnswer, QuizQuestion, ShortTextQuestion, TestCaseResult,
};

/// Split captured program output into lines for comparison.
///
/// Deliberate policy: split on `\n`, and a single trailing newline closes
/// the last line instead of opening an empty one. No other normalization,
/// in particular no trimming of whitespace inside lines.
pub fn output_lines(output: &str) -> Vec<String> {
    let output = output.strip_suffix('\n').unwrap_or(output);
    if output.is_empty() {
        return Vec::new();
    }
    output.split('\n').map(str::to_string).collect()
}

/// Grade a programming answer against the question's test cases.
///
/// Each test case compares its expected lines to the captured output lines.
/// The verdict is exact element-wise equality; any length mismatch fails.
/// Every test case is retained in question order regardless of outcome.
pub fn evaluate_programming(
    question: &ProgrammingQuestion,
    answer: &ProgrammingAnswer,
) -> ProgrammingEvaluation {
    let actual = output_lines(&answer.stdout);

    let test_cases = question
        .test_cases
        .iter()
        .map(|tc| TestCaseResult {
            title: tc.title.clone(),
            expected: tc.expected_output.clone(),
            actual: actual.clone(),
            verdict: actual == tc.expected_output,
        })
        .collect();

    ProgrammingEvaluation { test_cases }
}

/// A multiple-choice answer is correct iff the checked state of every option
/// equals its `is_correct` flag; options absent from the map are unchecked.
pub fn evaluate_multiple_choice(
    question: &MultipleChoiceQuestion,
    value: &HashMap<Uuid, bool>,
) -> bool {
    question.answers.iter().all(|option| {
        let checked = value.get(&option.answer_id).copied().unwrap_or(false);
        checked == option.is_correct
    })
}

/// A short-text answer is correct iff the trimmed input equals any accepted
/// answer. Case-sensitive.
pub fn evaluate_short_text(question: &ShortTextQuestion, value: &str) -> bool {
    let given = value.trim();
    question
        .accepted_answers
        .iter()
        .any(|accepted| accepted.value == given)
}

/// Grade any question type.
///
/// The outer match is total over the question-type union. Text, vorwissen
/// and cloze have no automatic grader yet and stay explicit extension
/// points.
pub fn evaluate(question: &QuizQuestion, answer: &QuizAnswer) -> Evaluation {
    match question {
        QuizQuestion::MultipleChoice(q) => match answer {
            QuizAnswer::MultipleChoice { value } => Evaluation::MultipleChoice {
                is_correct: evaluate_multiple_choice(q, value),
            },
            _ => mismatched(question, answer),
        },
        QuizQuestion::ShortText(q) => match answer {
            QuizAnswer::ShortText { value } => Evaluation::ShortText {
                is_correct: evaluate_short_text(q, value),
            },
            _ => mismatched(question, answer),
        },
        QuizQuestion::Programming(q) => match answer {
            QuizAnswer::Programming { value } => {
                Evaluation::Programming(evaluate_programming(q, value))
            }
            _ => mismatched(question, answer),
        },
        QuizQuestion::Text(_) | QuizQuestion::Vorwissen(_) | QuizQuestion::Cloze(_) => {
            Evaluation::NotImplemented
        }
    }
}

/// An answer recorded under a different question type cannot be graded.
/// This is a caller defect, not a learner outcome.
fn mismatched(question: &QuizQuestion, answer: &QuizAnswer) -> Evaluation {
    tracing::warn!(
        question_id = %question.question_id(),
        question_type = question.type_key(),
        answer_type = answer.type_key(),
        "Answer type does not match question type; cannot grade"
    );
    Evaluation::NotImplemented
}

/// Starting answer value for each question type. Total over the union.
pub fn initial_answer(question: &QuizQuestion) -> QuizAnswer {
    match question {
        QuizQuestion::MultipleChoice(_) => QuizAnswer::MultipleChoice {
            value: HashMap::new(),
        },
        QuizQuestion::ShortText(_) => QuizAnswer::ShortText {
            value: String::new(),
        },
        QuizQuestion::Text(_) => QuizAnswer::Text {
            value: String::new(),
        },
        QuizQuestion::Vorwissen(_) => QuizAnswer::Vorwissen {
            value: String::new(),
        },
        QuizQuestion::Cloze(_) => QuizAnswer::Cloze {
            value: String::new(),
        },
        QuizQuestion::Programming(q) => QuizAnswer::Programming {
            value: ProgrammingAnswer {
                code: q.custom.solution_template().to_string(),
                stdout: String::new(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_common::language::Language;
    use quiz_common::question::{
        AcceptedAnswer, MultipleChoiceOption, ProgrammingConfig, TestCase, Verdict,
    };

    fn programming_question(test_cases: Vec<TestCase>) -> ProgrammingQuestion {
        ProgrammingQuestion {
            question_id: Uuid::new_v4(),
            statement: String::new(),
            language: Language::Python,
            custom: ProgrammingConfig::Standalone {
                solution_template: "print('hi')".to_string(),
            },
            test_cases,
        }
    }

    fn test_case(title: &str, expected: &[&str]) -> TestCase {
        TestCase {
            title: title.to_string(),
            input: String::new(),
            expected_output: expected.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn answer(stdout: &str) -> ProgrammingAnswer {
        ProgrammingAnswer {
            code: "print('hi')".to_string(),
            stdout: stdout.to_string(),
        }
    }

    #[test]
    fn output_lines_splits_and_closes_final_newline() {
        assert_eq!(output_lines("hi\n"), vec!["hi"]);
        assert_eq!(output_lines("hi"), vec!["hi"]);
        assert_eq!(output_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(output_lines(""), Vec::<String>::new());
        // Interior empty lines survive; only one trailing newline is closed.
        assert_eq!(output_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert_eq!(output_lines("a\n\n"), vec!["a", ""]);
    }

    #[test]
    fn output_lines_does_not_trim_whitespace() {
        assert_eq!(output_lines("  hi  \n"), vec!["  hi  "]);
    }

    #[test]
    fn matching_lines_pass() {
        let question = programming_question(vec![test_case("t1", &["hi"])]);
        let evaluation = evaluate_programming(&question, &answer("hi\n"));

        assert_eq!(evaluation.test_cases.len(), 1);
        assert!(evaluation.test_cases[0].verdict);
        assert_eq!(evaluation.overall(), Verdict::Passed);
        assert!(evaluation.first_failed().is_none());
    }

    #[test]
    fn mismatching_lines_fail() {
        let question = programming_question(vec![test_case("t1", &["hello"])]);
        let evaluation = evaluate_programming(&question, &answer("hi\n"));

        assert!(!evaluation.test_cases[0].verdict);
        assert_eq!(evaluation.overall(), Verdict::Failed);
    }

    #[test]
    fn length_mismatch_fails() {
        let question = programming_question(vec![test_case("t1", &["a", "b"])]);

        let shorter = evaluate_programming(&question, &answer("a\n"));
        assert!(!shorter.test_cases[0].verdict);

        let longer = evaluate_programming(&question, &answer("a\nb\nc\n"));
        assert!(!longer.test_cases[0].verdict);
    }

    #[test]
    fn zero_test_cases_are_never_a_pass() {
        let question = programming_question(vec![]);
        let evaluation = evaluate_programming(&question, &answer("hi\n"));

        assert!(evaluation.test_cases.is_empty());
        assert_eq!(evaluation.overall(), Verdict::Unknown);
    }

    #[test]
    fn all_test_cases_are_retained_in_order() {
        let question = programming_question(vec![
            test_case("first", &["hi"]),
            test_case("second", &["nope"]),
            test_case("third", &["hi"]),
        ]);
        let evaluation = evaluate_programming(&question, &answer("hi\n"));

        let titles: Vec<&str> = evaluation
            .test_cases
            .iter()
            .map(|tc| tc.title.as_str())
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);

        let (index, failed) = evaluation.first_failed().unwrap();
        assert_eq!(index, 1);
        assert_eq!(failed.title, "second");
        assert_eq!(failed.expected, vec!["nope"]);
        assert_eq!(failed.actual, vec!["hi"]);
    }

    #[test]
    fn comparison_runs_even_for_failed_programs() {
        // Exit status is not an input of the evaluator: a program that
        // exited nonzero but printed the expected lines still passes the
        // comparison.
        let question = programming_question(vec![test_case("t1", &["hi"])]);
        let evaluation = evaluate_programming(&question, &answer("hi\n"));
        assert!(evaluation.test_cases[0].verdict);
    }

    fn multiple_choice_question(flags: &[bool]) -> MultipleChoiceQuestion {
        MultipleChoiceQuestion {
            question_id: Uuid::new_v4(),
            statement: String::new(),
            answers: flags
                .iter()
                .map(|&is_correct| MultipleChoiceOption {
                    answer_id: Uuid::new_v4(),
                    content: String::new(),
                    is_correct,
                })
                .collect(),
        }
    }

    #[test]
    fn multiple_choice_requires_exact_selection() {
        let question = multiple_choice_question(&[true, false, true]);
        let ids: Vec<Uuid> = question.answers.iter().map(|a| a.answer_id).collect();

        let mut value = HashMap::new();
        value.insert(ids[0], true);
        value.insert(ids[2], true);
        assert!(evaluate_multiple_choice(&question, &value));

        // Checking a wrong option fails.
        value.insert(ids[1], true);
        assert!(!evaluate_multiple_choice(&question, &value));

        // Missing a correct option fails; absent keys count as unchecked.
        let mut partial = HashMap::new();
        partial.insert(ids[0], true);
        assert!(!evaluate_multiple_choice(&question, &partial));

        // An explicit `false` equals an absent key.
        let mut explicit = HashMap::new();
        explicit.insert(ids[0], true);
        explicit.insert(ids[1], false);
        explicit.insert(ids[2], true);
        assert!(evaluate_multiple_choice(&question, &explicit));
    }

    #[test]
    fn short_text_trims_and_accepts_any_variant() {
        let question = ShortTextQuestion {
            question_id: Uuid::new_v4(),
            statement: String::new(),
            accepted_answers: vec![
                AcceptedAnswer {
                    accepted_answer_id: Uuid::new_v4(),
                    value: "42".to_string(),
                },
                AcceptedAnswer {
                    accepted_answer_id: Uuid::new_v4(),
                    value: "forty-two".to_string(),
                },
            ],
        };

        assert!(evaluate_short_text(&question, "42"));
        assert!(evaluate_short_text(&question, "  forty-two \n"));
        assert!(!evaluate_short_text(&question, "43"));
        // Case-sensitive.
        assert!(!evaluate_short_text(&question, "Forty-Two"));
    }

    #[test]
    fn dispatch_grades_programming_questions() {
        let question = QuizQuestion::Programming(programming_question(vec![test_case(
            "t1",
            &["hi"],
        )]));
        let answer = QuizAnswer::Programming {
            value: answer("hi\n"),
        };

        let Evaluation::Programming(evaluation) = evaluate(&question, &answer) else {
            panic!("expected a programming evaluation");
        };
        assert_eq!(evaluation.overall(), Verdict::Passed);
    }

    #[test]
    fn ungradeable_types_yield_not_implemented() {
        use quiz_common::question::{ClozeQuestion, TextQuestion, VorwissenQuestion};

        let text = QuizQuestion::Text(TextQuestion {
            question_id: Uuid::new_v4(),
            statement: String::new(),
        });
        let vorwissen = QuizQuestion::Vorwissen(VorwissenQuestion {
            question_id: Uuid::new_v4(),
            statement: String::new(),
        });
        let cloze = QuizQuestion::Cloze(ClozeQuestion {
            question_id: Uuid::new_v4(),
            cloze_text: String::new(),
        });

        for question in [&text, &vorwissen, &cloze] {
            let answer = initial_answer(question);
            assert_eq!(evaluate(question, &answer), Evaluation::NotImplemented);
        }
    }

    #[test]
    fn mismatched_answer_type_cannot_be_graded() {
        let question = QuizQuestion::Programming(programming_question(vec![]));
        let wrong = QuizAnswer::ShortText {
            value: "hi".to_string(),
        };
        assert_eq!(evaluate(&question, &wrong), Evaluation::NotImplemented);
    }

    #[test]
    fn initial_answer_copies_the_solution_template() {
        let question = QuizQuestion::Programming(programming_question(vec![]));

        let QuizAnswer::Programming { value } = initial_answer(&question) else {
            panic!("expected a programming answer");
        };
        assert_eq!(value.code, "print('hi')");
        assert_eq!(value.stdout, "");
    }

    #[test]
    fn initial_answers_are_empty_per_type() {
        let mc = QuizQuestion::MultipleChoice(multiple_choice_question(&[true]));
        let QuizAnswer::MultipleChoice { value } = initial_answer(&mc) else {
            panic!("expected a multiple-choice answer");
        };
        assert!(value.is_empty());

        let st = QuizQuestion::ShortText(ShortTextQuestion {
            question_id: Uuid::new_v4(),
            statement: String::new(),
            accepted_answers: vec![],
        });
        let QuizAnswer::ShortText { value } = initial_answer(&st) else {
            panic!("expected a short-text answer");
        };
        assert!(value.is_empty());
    }
}
