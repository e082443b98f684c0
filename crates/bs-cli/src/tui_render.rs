#![cfg(not(coverage))]

use bs_core::{Rect as WorldRect, Verdict};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui_state::{BoardViewport, TuiUiState};
use crate::{outcome_text, LevelPlay};

const ELLIPSIS: &str = "…";

pub(crate) fn render_tui(
    frame: &mut Frame<'_>,
    ui: &TuiUiState,
    play: &LevelPlay,
) -> BoardViewport {
    let area = frame.area();
    let viewport = BoardViewport::fit(area.x, area.y, area.width, area.height, ui.help_visible);
    let width = area.width as usize;
    let session = play.session();
    let level = play.level();
    let report = session.last_report();

    let header_text = truncate_to_width(
        format!(
            "{} | {} ({}) [{}] {}",
            level.id,
            level.title,
            play.position_label(),
            session.fill_state().label(),
            session.phase().label()
        )
        .as_str(),
        width,
    );
    let status_text = truncate_to_width(
        format!(
            "status: {} | {}",
            ui.status,
            outcome_text(report.map(|report| &report.outcome))
        )
        .as_str(),
        width,
    );
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(header_text),
            Line::from(Span::styled(status_text, Style::default().fg(Color::Gray))),
        ]),
        Rect::new(area.x, area.y, area.width, area.height.min(2)),
    );

    let board_area = Rect::new(viewport.col, viewport.row, viewport.cols, viewport.rows)
        .intersection(area);
    let board = session.board();

    for slot in board.slots() {
        let style = if slot.is_highlighted() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        draw_block(
            frame,
            board_area,
            &viewport,
            slot.block().bounds(),
            format!("row {}", slot.row()),
            slot.block().text(),
            style,
        );
    }

    draw_block(
        frame,
        board_area,
        &viewport,
        board.start().block().bounds(),
        "start".to_string(),
        board.start().block().text(),
        Style::default().fg(Color::Green),
    );
    let verdict = report.and_then(|report| report.outcome.verdict());
    let end_style = match verdict {
        Some(Verdict::Success) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Some(Verdict::Failure) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::Blue),
    };
    draw_block(
        frame,
        board_area,
        &viewport,
        board.end().block().bounds(),
        verdict
            .map(|verdict| verdict.label().to_string())
            .unwrap_or_else(|| "end".to_string()),
        board.end().block().text(),
        end_style,
    );

    for source in board.sources() {
        draw_block(
            frame,
            board_area,
            &viewport,
            source.block().bounds(),
            source.id().to_string(),
            source.block().text(),
            Style::default().fg(Color::Cyan),
        );
    }

    let mut footer = vec![Line::from(Span::styled(
        truncate_to_width(
            "keys: left-drag move | right-click clear | r restart | n/p level | h help | q quit",
            width,
        ),
        Style::default().fg(Color::Yellow),
    ))];
    if ui.help_visible {
        footer.push(Line::from(Span::styled(
            truncate_to_width(
                "each block fits one row. the program runs top to bottom and stops at the first empty row.",
                width,
            ),
            Style::default().fg(Color::Magenta),
        )));
    }
    let footer_rows = footer.len() as u16;
    let footer_top = area.bottom().saturating_sub(footer_rows).max(area.y);
    frame.render_widget(
        Paragraph::new(footer),
        Rect::new(area.x, footer_top, area.width, footer_rows.min(area.height)),
    );

    viewport
}

fn draw_block(
    frame: &mut Frame<'_>,
    board_area: Rect,
    viewport: &BoardViewport,
    bounds: WorldRect,
    title: String,
    text: &str,
    style: Style,
) {
    let cells = viewport.to_cells(bounds);
    let rect = Rect::new(cells.col, cells.row, cells.width, cells.height).intersection(board_area);
    if rect.width < 3 || rect.height < 3 {
        return;
    }
    let inner_width = rect.width.saturating_sub(2) as usize;
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(truncate_to_width(text, inner_width))
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style)
                    .title(truncate_to_width(&title, inner_width)),
            ),
        rect,
    );
}

fn truncate_to_width(value: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let chars = value.chars().collect::<Vec<_>>();
    if chars.len() <= width {
        return value.to_string();
    }
    if width == 1 {
        return ELLIPSIS.to_string();
    }
    let mut out = chars.into_iter().take(width - 1).collect::<String>();
    out.push_str(ELLIPSIS);
    out
}
