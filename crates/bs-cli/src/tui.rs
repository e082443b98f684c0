#[cfg(coverage)]
pub(super) fn run_tui_ratatui_mode(
    play: &mut super::LevelPlay,
) -> Result<i32, bs_core::BlockSeqError> {
    super::run_tui_line_mode(play)
}

#[cfg(not(coverage))]
mod rich {
    use std::io;
    use std::time::Duration;

    use bs_core::BlockSeqError;
    use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
    use crossterm::terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    };
    use crossterm::ExecutableCommand;
    use ratatui::backend::CrosstermBackend;
    use ratatui::Terminal;
    use tracing::info;

    use crate::tui_actions::{handle_key, handle_mouse};
    use crate::tui_render::render_tui;
    use crate::tui_state::TuiUiState;
    use crate::{map_tui_io, LevelPlay};

    const FRAME_TICK_MS: u64 = 50;

    struct TuiTerminal {
        terminal: Terminal<CrosstermBackend<io::Stdout>>,
    }

    impl TuiTerminal {
        fn new() -> Result<Self, BlockSeqError> {
            enable_raw_mode().map_err(map_tui_io)?;
            io::stdout()
                .execute(EnterAlternateScreen)
                .map_err(map_tui_io)?;
            io::stdout()
                .execute(EnableMouseCapture)
                .map_err(map_tui_io)?;
            let backend = CrosstermBackend::new(io::stdout());
            let terminal = Terminal::new(backend).map_err(map_tui_io)?;
            Ok(Self { terminal })
        }

        fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<io::Stdout>> {
            &mut self.terminal
        }
    }

    impl Drop for TuiTerminal {
        fn drop(&mut self) {
            let _ = io::stdout().execute(DisableMouseCapture);
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(LeaveAlternateScreen);
        }
    }

    pub(super) fn run_tui_ratatui_mode(play: &mut LevelPlay) -> Result<i32, BlockSeqError> {
        let mut terminal = TuiTerminal::new()?;
        let mut ui = TuiUiState::new();
        let tick = Duration::from_millis(FRAME_TICK_MS);
        info!(level = %play.level().id, "board opened");

        loop {
            let mut viewport = ui.viewport;
            terminal
                .terminal_mut()
                .draw(|frame| viewport = render_tui(frame, &ui, play))
                .map_err(map_tui_io)?;
            ui.viewport = viewport;

            if !event::poll(tick).map_err(map_tui_io)? {
                play.session_mut().update();
                continue;
            }

            let handled = match event::read().map_err(map_tui_io)? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(key, play, &mut ui)
                }
                Event::Mouse(mouse) => handle_mouse(mouse, play, &mut ui).map(|_| false),
                _ => Ok(false),
            };
            match handled {
                Ok(true) => break,
                Ok(false) => {}
                Err(error) => ui.status = error.message,
            }
        }

        Ok(0)
    }
}

pub(super) fn interactive_terminal() -> bool {
    use std::io::IsTerminal;

    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

#[cfg(not(coverage))]
pub(super) fn run_tui_ratatui_mode(
    play: &mut super::LevelPlay,
) -> Result<i32, bs_core::BlockSeqError> {
    if !interactive_terminal() {
        return super::run_tui_line_mode(play);
    }
    rich::run_tui_ratatui_mode(play)
}
