use bs_core::BlockSeqError;
use bs_runtime::{ControllerResponse, DragEffect, PointerButton, PointerInput};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::tui_state::TuiUiState;
use crate::{outcome_text, LevelPlay};

pub(crate) fn handle_key(
    key: KeyEvent,
    play: &mut LevelPlay,
    ui: &mut TuiUiState,
) -> Result<bool, BlockSeqError> {
    if key.code == KeyCode::Esc || matches!(key.code, KeyCode::Char('q')) {
        return Ok(true);
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match key.code {
        KeyCode::Char('h') => {
            ui.help_visible = !ui.help_visible;
        }
        KeyCode::Char('r') => {
            play.restart()?;
            ui.status = "restarted".to_string();
        }
        KeyCode::Char('n') | KeyCode::Char('p') => {
            play.step(key.code == KeyCode::Char('n'))?;
            ui.status = format!("level {} {}", play.position_label(), play.level().title);
        }
        _ => {}
    }
    Ok(false)
}

pub(crate) fn handle_mouse(
    mouse: MouseEvent,
    play: &mut LevelPlay,
    ui: &mut TuiUiState,
) -> Result<(), BlockSeqError> {
    let point = ui.viewport.to_world(mouse.column, mouse.row);
    let input = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerInput::Press {
            point,
            button: PointerButton::Primary,
        },
        MouseEventKind::Down(MouseButton::Right) => PointerInput::Press {
            point,
            button: PointerButton::Secondary,
        },
        MouseEventKind::Drag(MouseButton::Left) => PointerInput::Move { point },
        MouseEventKind::Up(MouseButton::Left) => PointerInput::Release { point },
        _ => return Ok(()),
    };

    let responses = play.session_mut().pointer(input)?;
    if let Some(status) = status_for(&responses) {
        ui.status = status;
    }
    Ok(())
}

fn status_for(responses: &[ControllerResponse]) -> Option<String> {
    responses.iter().rev().find_map(|response| {
        let outcome = || outcome_text(response.execution.as_ref().map(|report| &report.outcome));
        match response.effect {
            DragEffect::Started => Some("dragging".to_string()),
            DragEffect::Previewed { zone, .. } => Some(format!("over row {}", zone)),
            DragEffect::HoverRejected { zone } => {
                Some(format!("row {} does not take this block", zone))
            }
            DragEffect::Placed { zone, .. } => {
                Some(format!("placed in row {}: {}", zone, outcome()))
            }
            DragEffect::DropRejected { zone } => {
                Some(format!("row {} rejected the block", zone))
            }
            DragEffect::Detached { zone } => {
                Some(format!("cleared row {}: {}", zone, outcome()))
            }
            DragEffect::Returned => Some("returned home".to_string()),
            _ => None,
        }
    })
}
