use bs_api::{summarize_session, SessionSummary};
use bs_core::{BlockSeqError, ExecutionOutcome};
use bs_runtime::PuzzleSession;
use serde::Serialize;

use crate::{map_cli_json, LoadedLevel};

#[derive(Serialize)]
struct FaultView<'a> {
    index: usize,
    message: &'a str,
}

pub(crate) fn session_report_lines(
    summary: &SessionSummary,
) -> Result<Vec<String>, BlockSeqError> {
    let mut lines = vec![
        "RESULT:OK".to_string(),
        format!("LEVEL:{}", summary.level),
        format!("FILL:{}", summary.fill),
    ];

    let outcome = summary.outcome.as_ref();
    lines.push(format!(
        "OUTCOME:{}",
        outcome.map(ExecutionOutcome::kind_name).unwrap_or("NONE")
    ));
    lines.push(format!(
        "VERDICT:{}",
        outcome
            .and_then(ExecutionOutcome::verdict)
            .map(|verdict| verdict.label())
            .unwrap_or("NONE")
    ));
    lines.push(format!(
        "HALTED_AT:{}",
        match outcome {
            Some(ExecutionOutcome::Halted { gap }) => gap.to_string(),
            _ => "NONE".to_string(),
        }
    ));
    let fault = match outcome {
        Some(ExecutionOutcome::Faulted { index, message }) => Some(FaultView {
            index: *index,
            message,
        }),
        _ => None,
    };
    lines.push(format!(
        "FAULT_JSON:{}",
        serde_json::to_string(&fault).map_err(map_cli_json)?
    ));
    lines.push(format!(
        "INVOKED:{}",
        summary
            .invoked
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(",")
    ));
    lines.push(format!(
        "VAR_JSON:{}",
        serde_json::to_string(&summary.variables).map_err(map_cli_json)?
    ));
    for slot in &summary.slots {
        lines.push(format!(
            "SLOT:{}:{}:{}",
            slot.row,
            slot.occupant
                .map(|occupant| occupant.to_string())
                .unwrap_or_else(|| "-".to_string()),
            serde_json::to_string(&slot.text).map_err(map_cli_json)?
        ));
    }
    Ok(lines)
}

pub(crate) fn emit_session_report(session: &PuzzleSession) -> Result<i32, BlockSeqError> {
    for line in session_report_lines(&summarize_session(session))? {
        println!("{}", line);
    }
    Ok(0)
}

pub(crate) fn layout_lines(
    level: &LoadedLevel,
    session: &PuzzleSession,
) -> Result<Vec<String>, BlockSeqError> {
    let board = session.board();
    let json = |text: &str| serde_json::to_string(text).map_err(map_cli_json);

    let mut lines = vec![
        "RESULT:OK".to_string(),
        format!("LEVEL:{}", level.id),
        format!("TITLE_JSON:{}", json(level.title.as_str())?),
        format!("ORIGIN:{}", level.origin_label()),
        format!("ROWS:{}", board.row_count()),
    ];

    let start = board.start().block();
    lines.push(format!(
        "START:{}:{}:{}",
        start.position().x,
        start.position().y,
        json(start.text())?
    ));
    for slot in board.slots() {
        lines.push(format!(
            "DESTINATION:{}:{}:{}:{}",
            slot.row(),
            slot.position().x,
            slot.position().y,
            json(slot.block().text())?
        ));
    }
    for source in board.sources() {
        lines.push(format!(
            "SOURCE:{}:{}:{}:{}:{}",
            source.id().0,
            board.bound_row(source.id())?,
            source.original_position().x,
            source.original_position().y,
            json(source.block().text())?
        ));
    }
    let end = board.end().block();
    lines.push(format!(
        "END:{}:{}:{}",
        end.position().x,
        end.position().y,
        json(end.text())?
    ));
    Ok(lines)
}

pub(crate) fn outcome_text(outcome: Option<&ExecutionOutcome>) -> String {
    match outcome {
        None => "not run".to_string(),
        Some(ExecutionOutcome::Halted { gap }) => format!("halted before entry {}", gap),
        Some(ExecutionOutcome::Faulted { index, message }) => {
            format!("fault at entry {}: {}", index, message)
        }
        Some(ExecutionOutcome::Completed { verdict }) => verdict.label().to_string(),
    }
}

pub(crate) fn board_text_lines(session: &PuzzleSession) -> Vec<String> {
    let board = session.board();
    let mut lines = vec![format!("  start: {}", board.start().block().text())];

    for slot in board.slots() {
        let seated = slot
            .occupant()
            .and_then(|id| board.source(id))
            .map(|source| format!("[{}] {}", source.id(), source.block().text()))
            .unwrap_or_else(|| "(empty)".to_string());
        lines.push(format!("  row {}: {}", slot.row(), seated));
    }
    lines.push(format!("  end: {}", board.end().block().text()));

    lines.push("  sources:".to_string());
    for source in board.sources() {
        let place = board
            .slots()
            .iter()
            .find(|slot| slot.occupant() == Some(source.id()))
            .map(|slot| format!("in row {}", slot.row()))
            .unwrap_or_else(|| "home".to_string());
        lines.push(format!(
            "    {} {} ({})",
            source.id(),
            source.block().text(),
            place
        ));
    }

    lines.push(format!(
        "  outcome: {}",
        outcome_text(session.last_report().map(|report| &report.outcome))
    ));
    let variables = session
        .store()
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("  variables: {}", variables));
    lines
}
