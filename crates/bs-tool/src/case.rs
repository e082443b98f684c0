use std::collections::BTreeMap;

use bs_core::{VarValue, Verdict};
use serde::{Deserialize, Serialize};

pub const CASE_SCHEMA_V1: &str = "blockseq-case.v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelCase {
    pub schema_version: String,
    pub level: String,
    #[serde(default)]
    pub moves: Vec<CaseMove>,
    pub expected: ExpectedResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CaseMove {
    Place { source: usize, row: usize },
    Detach { source: usize },
    Drag { source: usize, x: f32, y: f32 },
    Restart,
}

impl CaseMove {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Place { .. } => "place",
            Self::Detach { .. } => "detach",
            Self::Drag { .. } => "drag",
            Self::Restart => "restart",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExpectedOutcome {
    Halted { at: usize },
    Faulted { at: usize },
    Completed { verdict: Verdict },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedResult {
    pub outcome: ExpectedOutcome,
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub variables: BTreeMap<String, VarValue>,
}
