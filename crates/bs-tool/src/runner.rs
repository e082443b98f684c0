use std::path::Path;

use bs_api::{create_session, summarize_session, CreateSessionOptions};
use bs_core::{ExecutionOutcome, Point, SourceId, VariableMap};
use bs_runtime::{ControllerResponse, DragEffect, PuzzleSession};

use crate::source::{read_case, read_level_file};
use crate::{BsToolError, CaseMove, ExpectedOutcome, LevelCase};

#[derive(Debug, Clone, PartialEq)]
pub struct ObservedResult {
    pub outcome: ExpectedOutcome,
    pub fill: String,
    pub variables: VariableMap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub observed: ObservedResult,
    pub applied_moves: usize,
    pub ignored_moves: Vec<usize>,
}

pub fn run_case(case_dir: &Path, case: &LevelCase) -> Result<RunReport, BsToolError> {
    let level_json = read_level_file(&case_dir.join(&case.level))?;
    let mut session = create_session(CreateSessionOptions::json(level_json))?;
    let mut ignored_moves = Vec::new();

    for (index, step) in case.moves.iter().enumerate() {
        let responses = apply_move(&mut session, step)?;
        if responses
            .iter()
            .all(|response| response.effect == DragEffect::Ignored)
            && !responses.is_empty()
        {
            ignored_moves.push(index);
        }
    }

    let summary = summarize_session(&session);
    let outcome = match summary.outcome.ok_or(BsToolError::NoReport)? {
        ExecutionOutcome::Halted { gap } => ExpectedOutcome::Halted { at: gap },
        ExecutionOutcome::Faulted { index, .. } => ExpectedOutcome::Faulted { at: index },
        ExecutionOutcome::Completed { verdict } => ExpectedOutcome::Completed { verdict },
    };

    Ok(RunReport {
        observed: ObservedResult {
            outcome,
            fill: summary.fill,
            variables: summary.variables,
        },
        applied_moves: case.moves.len(),
        ignored_moves,
    })
}

fn apply_move(
    session: &mut PuzzleSession,
    step: &CaseMove,
) -> Result<Vec<ControllerResponse>, BsToolError> {
    let responses = match step {
        CaseMove::Place { source, row } => session.place(SourceId(*source), *row)?,
        CaseMove::Detach { source } => vec![session.detach(SourceId(*source))?],
        CaseMove::Drag { source, x, y } => {
            session.drag_to(SourceId(*source), Point::new(*x, *y))?
        }
        CaseMove::Restart => {
            session.restart()?;
            Vec::new()
        }
    };
    Ok(responses)
}

pub fn assert_case(case_path: &Path) -> Result<RunReport, BsToolError> {
    let case = read_case(case_path)?;
    let case_dir = case_path.parent().unwrap_or_else(|| Path::new("."));
    let report = run_case(case_dir, &case)?;
    let observed = &report.observed;

    if observed.outcome != case.expected.outcome {
        let expected =
            serde_json::to_string(&case.expected.outcome).map_err(BsToolError::OutcomeSerialize)?;
        let actual =
            serde_json::to_string(&observed.outcome).map_err(BsToolError::OutcomeSerialize)?;
        return Err(BsToolError::OutcomeMismatch { expected, actual });
    }

    if let Some(fill) = &case.expected.fill {
        if fill != &observed.fill {
            return Err(BsToolError::FillMismatch {
                expected: fill.clone(),
                actual: observed.fill.clone(),
            });
        }
    }

    for (name, expected) in &case.expected.variables {
        let actual = observed.variables.get(name);
        if actual != Some(expected) {
            return Err(BsToolError::VariableMismatch {
                name: name.clone(),
                expected: expected.to_string(),
                actual: actual
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "<undeclared>".to_string()),
            });
        }
    }

    Ok(report)
}

#[cfg(test)]
mod runner_tests {
    use super::*;
    use bs_core::{VarValue, Verdict};
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn levels_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../levels")
    }

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should move forward")
            .as_nanos();
        std::env::temp_dir().join(format!("bs-tool-runner-{}-{}", name, nanos))
    }

    fn case(moves: Vec<CaseMove>, outcome: ExpectedOutcome) -> LevelCase {
        LevelCase {
            schema_version: crate::CASE_SCHEMA_V1.to_string(),
            level: "assign-and-add.level.json".to_string(),
            moves,
            expected: crate::ExpectedResult {
                outcome,
                fill: None,
                variables: BTreeMap::new(),
            },
        }
    }

    fn write_case(name: &str, case: &LevelCase) -> PathBuf {
        let root = temp_dir(name);
        fs::create_dir_all(&root).expect("root should be created");
        fs::copy(
            levels_dir().join("basics/assign-and-add.level.json"),
            root.join("assign-and-add.level.json"),
        )
        .expect("level should be copied");
        let path = root.join(format!("{}.case.json", name));
        fs::write(
            &path,
            serde_json::to_string_pretty(case).expect("case should serialize"),
        )
        .expect("case should be written");
        path
    }

    #[test]
    fn every_shipped_case_passes() {
        let cases = discover_cases_for_test();
        assert!(cases.len() >= 6, "found {} cases", cases.len());
        for path in cases {
            if let Err(error) = assert_case(&path) {
                panic!("{} failed: {}", path.display(), error);
            }
        }
    }

    fn discover_cases_for_test() -> Vec<PathBuf> {
        crate::discover_cases(&levels_dir()).expect("shipped cases should exist")
    }

    #[test]
    fn run_case_records_ignored_moves() {
        let case = case(
            vec![
                CaseMove::Detach { source: 0 },
                CaseMove::Place { source: 1, row: 1 },
            ],
            ExpectedOutcome::Halted { at: 2 },
        );
        let case_dir = levels_dir().join("basics");
        let report = run_case(&case_dir, &case).expect("case should run");
        assert_eq!(report.applied_moves, 2);
        assert_eq!(report.ignored_moves, vec![0]);
        assert_eq!(report.observed.outcome, ExpectedOutcome::Halted { at: 2 });
        assert_eq!(report.observed.fill, "partial");
        assert_eq!(report.observed.variables.get("b"), Some(&VarValue::Int(5)));
    }

    #[test]
    fn assert_case_reports_outcome_mismatch() {
        let path = write_case(
            "outcome-mismatch",
            &case(
                vec![CaseMove::Place { source: 1, row: 1 }],
                ExpectedOutcome::Completed {
                    verdict: Verdict::Success,
                },
            ),
        );
        let error = assert_case(&path).expect_err("outcome should mismatch");
        match error {
            BsToolError::OutcomeMismatch { expected, actual } => {
                assert!(expected.contains("completed"));
                assert!(actual.contains("halted"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn assert_case_reports_fill_and_variable_mismatch() {
        let mut fill_case = case(
            vec![CaseMove::Place { source: 1, row: 1 }],
            ExpectedOutcome::Halted { at: 2 },
        );
        fill_case.expected.fill = Some("complete".to_string());
        let error = assert_case(&write_case("fill-mismatch", &fill_case))
            .expect_err("fill should mismatch");
        assert!(matches!(error, BsToolError::FillMismatch { .. }));

        let mut variable_case = case(
            vec![CaseMove::Place { source: 1, row: 1 }],
            ExpectedOutcome::Halted { at: 2 },
        );
        variable_case
            .expected
            .variables
            .insert("b".to_string(), VarValue::Int(6));
        let error = assert_case(&write_case("variable-mismatch", &variable_case))
            .expect_err("variable should mismatch");
        match error {
            BsToolError::VariableMismatch {
                name,
                expected,
                actual,
            } => {
                assert_eq!(name, "b");
                assert_eq!(expected, "6");
                assert_eq!(actual, "5");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn missing_level_file_is_a_read_error() {
        let mut broken = case(Vec::new(), ExpectedOutcome::Halted { at: 1 });
        broken.level = "missing.level.json".to_string();
        let error = run_case(&temp_dir("missing-level"), &broken).expect_err("level is missing");
        assert!(matches!(error, BsToolError::ReadFile { .. }));
    }
}
