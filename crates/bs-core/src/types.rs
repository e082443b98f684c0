use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::value::VarValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Start,
    Source,
    Destination,
    End,
}

impl BlockKind {
    pub fn texture(self) -> &'static str {
        match self {
            Self::Start => "start_block",
            Self::Source => "source_block",
            Self::Destination => "destination_block",
            Self::End => "end_block",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(pub usize);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Success,
    Failure,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FillState {
    Pristine,
    Partial,
    Complete,
}

impl FillState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pristine => "pristine",
            Self::Partial => "partial",
            Self::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExecutionOutcome {
    Halted { gap: usize },
    Faulted { index: usize, message: String },
    Completed { verdict: Verdict },
}

impl ExecutionOutcome {
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Self::Completed { verdict } => Some(*verdict),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Halted { .. } => "halted",
            Self::Faulted { .. } => "faulted",
            Self::Completed { .. } => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDecl {
    pub name: String,
    #[serde(default)]
    pub initial: VarValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDef {
    pub position: Point,
    pub text: String,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDef {
    pub row: usize,
    pub position: Point,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDef {
    pub position: Point,
    pub text: String,
    pub row: usize,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndDef {
    pub position: Point,
    pub text: String,
    #[serde(default)]
    pub goal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDefinition {
    pub schema_version: String,
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub variables: Vec<VariableDecl>,
    pub start: StartDef,
    #[serde(default)]
    pub destination_text: Option<String>,
    pub destinations: Vec<DestinationDef>,
    pub sources: Vec<SourceDef>,
    pub end: EndDef,
}

pub type VariableMap = BTreeMap<String, VarValue>;
