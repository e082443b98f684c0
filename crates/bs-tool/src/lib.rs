mod case;
mod runner;
mod source;

pub use case::{CaseMove, ExpectedOutcome, ExpectedResult, LevelCase, CASE_SCHEMA_V1};
pub use runner::{assert_case, run_case, ObservedResult, RunReport};
pub use source::{discover_cases, read_case, read_level_file};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BsToolError {
    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse case {path}: {source}")]
    ParseCase {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid case schema version \"{found}\", expected \"{expected}\".")]
    InvalidSchemaVersion { expected: String, found: String },
    #[error("No .case.json files under {path}.")]
    CaseEmpty { path: PathBuf },
    #[error("Level error: {0}")]
    Level(#[from] bs_core::BlockSeqError),
    #[error("Move {index} ({kind}) was ignored by the board.")]
    MoveIgnored { index: usize, kind: String },
    #[error("Session produced no execution report.")]
    NoReport,
    #[error("Outcome mismatch. expected={expected} actual={actual}")]
    OutcomeMismatch { expected: String, actual: String },
    #[error("Fill mismatch. expected={expected} actual={actual}")]
    FillMismatch { expected: String, actual: String },
    #[error("Variable \"{name}\" mismatch. expected={expected} actual={actual}")]
    VariableMismatch {
        name: String,
        expected: String,
        actual: String,
    },
    #[error("Failed to serialize outcome for diff: {0}")]
    OutcomeSerialize(serde_json::Error),
}
