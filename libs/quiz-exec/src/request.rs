//! Assembles the ordered file set sent to the sandbox.
//!
//! Pure transformation from question configuration plus learner source to an
//! execute request. File order is load-bearing: the sandbox runs the first
//! file as the program entry point.

use quiz_common::language::Language;
use quiz_common::question::{ProgrammingConfig, ProgrammingQuestion};
use quiz_common::types::{ExecuteRequest, PistonFile};

/// Minimal module settings so the sandbox's TypeScript toolchain resolves
/// the harness/solution pair correctly.
const TS_PACKAGE_JSON: &str = r#"{ "type": "module" }"#;

const TS_CONFIG_JSON: &str = r#"{
  "compilerOptions": {
    "target": "es2015",
    "module": "commonjs",
    "rootDir": "."
  }
}
"#;

/// Build the ordered file list for a question and the learner's source.
///
/// Callable mode puts the harness first (it is the entry point), standalone
/// mode makes the solution itself the entry point. The solution file is
/// always last.
pub fn build_files(question: &ProgrammingQuestion, source: &str) -> Vec<PistonFile> {
    let ext = question.language.extension();
    let mut files = Vec::new();

    if let ProgrammingConfig::Callable { main_file, .. } = &question.custom {
        files.push(PistonFile::new(format!("Main.{}", ext), main_file.clone()));

        if question.language == Language::Typescript {
            files.push(PistonFile::new("package.json", TS_PACKAGE_JSON));
            files.push(PistonFile::new("tsconfig.json", TS_CONFIG_JSON));
        }
    }

    files.push(PistonFile::new(format!("Solution.{}", ext), source));
    files
}

/// Build the full execute request for an already-resolved runtime version.
pub fn build_execute_request(
    question: &ProgrammingQuestion,
    source: &str,
    version: &str,
) -> ExecuteRequest {
    ExecuteRequest::new(
        question.language.key(),
        version,
        build_files(question, source),
    )
}
