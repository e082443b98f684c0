use bs_core::{BlockSeqError, ExecutionOutcome, LevelDefinition, VariableMap};
use bs_level::{compile_level_with, parse_level_json, CompileOptions};
use bs_runtime::PuzzleSession;
use serde::Serialize;

pub use bs_level::{builtin_level_ids, builtin_level_json, validate_definition};

#[derive(Debug, Clone, PartialEq)]
pub enum LevelSource {
    Json(String),
    Builtin(String),
    Definition(LevelDefinition),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSessionOptions {
    pub level: LevelSource,
    pub max_operations: Option<u64>,
}

impl CreateSessionOptions {
    pub fn builtin(id: impl Into<String>) -> Self {
        Self {
            level: LevelSource::Builtin(id.into()),
            max_operations: None,
        }
    }

    pub fn json(text: impl Into<String>) -> Self {
        Self {
            level: LevelSource::Json(text.into()),
            max_operations: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSummary {
    pub id: String,
    pub title: String,
    pub rows: usize,
    pub sources: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSummary {
    pub row: usize,
    pub occupant: Option<usize>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub level: String,
    pub fill: String,
    pub outcome: Option<ExecutionOutcome>,
    pub invoked: Vec<usize>,
    pub variables: VariableMap,
    pub slots: Vec<SlotSummary>,
}

pub fn load_definition(source: &LevelSource) -> Result<LevelDefinition, BlockSeqError> {
    match source {
        LevelSource::Json(text) => parse_level_json(text),
        LevelSource::Builtin(id) => parse_level_json(builtin_level_json(id)?),
        LevelSource::Definition(definition) => Ok(definition.clone()),
    }
}

pub fn create_session(options: CreateSessionOptions) -> Result<PuzzleSession, BlockSeqError> {
    let mut compile = CompileOptions::default();
    if let Some(max_operations) = options.max_operations {
        if max_operations == 0 {
            return Err(BlockSeqError::new(
                "API_MAX_OPERATIONS_INVALID",
                "Operation budget must be at least 1.",
            ));
        }
        compile.max_operations = max_operations;
    }
    let definition = load_definition(&options.level)?;
    PuzzleSession::new(compile_level_with(&definition, compile)?)
}

pub fn summarize_level(definition: &LevelDefinition) -> LevelSummary {
    LevelSummary {
        id: definition.id.clone(),
        title: definition.title.clone(),
        rows: definition.destinations.len(),
        sources: definition.sources.len(),
    }
}

pub fn list_builtin_levels() -> Result<Vec<LevelSummary>, BlockSeqError> {
    builtin_level_ids()
        .into_iter()
        .map(|id| {
            let definition = load_definition(&LevelSource::Builtin(id.to_string()))?;
            Ok(summarize_level(&definition))
        })
        .collect()
}

pub fn summarize_session(session: &PuzzleSession) -> SessionSummary {
    let board = session.board();
    let slots = board
        .slots()
        .iter()
        .map(|slot| {
            let occupant = slot.occupant();
            SlotSummary {
                row: slot.row(),
                occupant: occupant.map(|id| id.0),
                text: occupant
                    .and_then(|id| board.source(id))
                    .map(|source| source.block().text().to_string()),
            }
        })
        .collect();
    let report = session.last_report();

    SessionSummary {
        level: session.id().to_string(),
        fill: session.fill_state().label().to_string(),
        outcome: report.map(|report| report.outcome.clone()),
        invoked: report.map(|report| report.invoked.clone()).unwrap_or_default(),
        variables: session.store().snapshot(),
        slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bs_core::{SourceId, Verdict};

    #[test]
    fn create_session_from_builtin_runs_start() {
        let session =
            create_session(CreateSessionOptions::builtin("assign-and-add")).expect("session");
        let summary = summarize_session(&session);
        assert_eq!(summary.level, "assign-and-add");
        assert_eq!(summary.fill, "pristine");
        assert_eq!(summary.outcome, Some(ExecutionOutcome::Halted { gap: 1 }));
        assert_eq!(summary.invoked, vec![0]);
        assert_eq!(summary.slots.len(), 3);
        assert!(summary.slots.iter().all(|slot| slot.occupant.is_none()));
    }

    #[test]
    fn create_session_from_json_matches_builtin() {
        let json = builtin_level_json("swap").expect("builtin json");
        let mut session = create_session(CreateSessionOptions::json(json)).expect("session");
        for (source, row) in [(0, 1), (2, 2), (4, 3)] {
            session.place(SourceId(source), row).expect("place");
        }
        let summary = summarize_session(&session);
        assert_eq!(
            summary.outcome,
            Some(ExecutionOutcome::Completed {
                verdict: Verdict::Success
            })
        );
        assert_eq!(summary.slots[1].text.as_deref(), Some("a = b;"));
        assert_eq!(summary.slots[1].occupant, Some(2));
    }

    #[test]
    fn zero_operation_budget_is_rejected() {
        let error = create_session(CreateSessionOptions {
            level: LevelSource::Builtin("swap".to_string()),
            max_operations: Some(0),
        })
        .expect_err("zero budget should fail");
        assert_eq!(error.code, "API_MAX_OPERATIONS_INVALID");
    }

    #[test]
    fn unknown_builtin_is_reported() {
        let error = create_session(CreateSessionOptions::builtin("missing"))
            .expect_err("missing builtin should fail");
        assert_eq!(error.code, "LEVEL_BUILTIN_UNKNOWN");
    }

    #[test]
    fn builtin_catalog_lists_titles() {
        let levels = list_builtin_levels().expect("catalog");
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].title, "Assign and add");
        assert_eq!(levels[1].rows, 3);
    }

    #[test]
    fn summary_serializes_camel_case() {
        let session = create_session(CreateSessionOptions::builtin("swap")).expect("session");
        let json = serde_json::to_value(summarize_session(&session)).expect("summary json");
        assert_eq!(json["fill"], "pristine");
        assert_eq!(json["outcome"]["kind"], "halted");
        assert_eq!(json["variables"]["a"], 4);
        assert_eq!(json["variables"]["t"], serde_json::Value::Null);
    }
}
