use bs_api::{create_session, CreateSessionOptions, LevelSource};
use bs_core::{BlockSeqError, Point, SourceId};
use bs_runtime::{ControllerResponse, DragEffect, PuzzleSession};
use tracing::{debug, info};

use crate::{AgentMove, LoadedLevel};

pub(crate) struct LevelPlay {
    catalog: Vec<LoadedLevel>,
    index: usize,
    session: PuzzleSession,
}

impl LevelPlay {
    pub(crate) fn new(catalog: Vec<LoadedLevel>, index: usize) -> Result<Self, BlockSeqError> {
        let level = catalog.get(index).ok_or_else(|| {
            BlockSeqError::new(
                "CLI_LEVEL_INDEX",
                format!("Level index {} is outside a catalog of {}.", index, catalog.len()),
            )
        })?;
        let session = create_session_for_level(level, None)?;
        Ok(Self {
            catalog,
            index,
            session,
        })
    }

    pub(crate) fn level(&self) -> &LoadedLevel {
        &self.catalog[self.index]
    }

    pub(crate) fn session(&self) -> &PuzzleSession {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut PuzzleSession {
        &mut self.session
    }

    pub(crate) fn position_label(&self) -> String {
        format!("{}/{}", self.index + 1, self.catalog.len())
    }

    pub(crate) fn step(&mut self, forward: bool) -> Result<(), BlockSeqError> {
        let len = self.catalog.len();
        let next = if forward {
            (self.index + 1) % len
        } else {
            (self.index + len - 1) % len
        };
        self.session = create_session_for_level(&self.catalog[next], None)?;
        self.index = next;
        info!(level = %self.level().id, "level selected");
        Ok(())
    }

    pub(crate) fn restart(&mut self) -> Result<(), BlockSeqError> {
        self.session.restart()?;
        Ok(())
    }
}

pub(crate) fn create_session_for_level(
    level: &LoadedLevel,
    max_operations: Option<u64>,
) -> Result<PuzzleSession, BlockSeqError> {
    create_session(CreateSessionOptions {
        level: LevelSource::Json(level.json.clone()),
        max_operations,
    })
}

pub(crate) fn parse_agent_move(raw: &str) -> Result<AgentMove, BlockSeqError> {
    let parts = raw
        .split(|ch: char| ch == ':' || ch.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();

    let parsed = match parts.as_slice() {
        ["place", source, row] => Some(AgentMove::Place {
            source: parse_index(source)?,
            row: parse_index(row)?,
        }),
        ["detach", source] => Some(AgentMove::Detach {
            source: parse_index(source)?,
        }),
        ["drag", source, x, y] => Some(AgentMove::Drag {
            source: parse_index(source)?,
            x: parse_coordinate(x)?,
            y: parse_coordinate(y)?,
        }),
        ["restart"] => Some(AgentMove::Restart),
        _ => None,
    };

    parsed.ok_or_else(|| {
        BlockSeqError::new(
            "CLI_MOVE_INVALID",
            format!(
                "Unrecognized move \"{}\". Use place:S:R, detach:S, drag:S:X:Y or restart.",
                raw
            ),
        )
    })
}

pub(crate) fn apply_move(
    session: &mut PuzzleSession,
    agent_move: &AgentMove,
) -> Result<&'static str, BlockSeqError> {
    let responses = match agent_move {
        AgentMove::Place { source, row } => session.place(SourceId(*source), *row)?,
        AgentMove::Detach { source } => vec![session.detach(SourceId(*source))?],
        AgentMove::Drag { source, x, y } => {
            session.drag_to(SourceId(*source), Point::new(*x, *y))?
        }
        AgentMove::Restart => {
            session.restart()?;
            return Ok("restarted");
        }
    };
    let label = move_label(&responses);
    debug!(?agent_move, label, "move applied");
    Ok(label)
}

pub(crate) fn move_label(responses: &[ControllerResponse]) -> &'static str {
    responses
        .iter()
        .rev()
        .find_map(|response| match response.effect {
            DragEffect::Placed { .. } => Some("placed"),
            DragEffect::DropRejected { .. } => Some("rejected"),
            DragEffect::Detached { .. } => Some("detached"),
            DragEffect::Returned => Some("returned"),
            _ => None,
        })
        .unwrap_or("ignored")
}

fn parse_index(raw: &str) -> Result<usize, BlockSeqError> {
    raw.parse::<usize>().map_err(|_| {
        BlockSeqError::new(
            "CLI_MOVE_INVALID",
            format!("Expected a non-negative integer, got \"{}\".", raw),
        )
    })
}

fn parse_coordinate(raw: &str) -> Result<f32, BlockSeqError> {
    raw.parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            BlockSeqError::new(
                "CLI_MOVE_INVALID",
                format!("Expected a coordinate, got \"{}\".", raw),
            )
        })
}
