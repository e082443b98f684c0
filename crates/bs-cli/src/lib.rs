use std::ffi::OsString;

use bs_core::BlockSeqError;
use clap::Parser;

mod agent;
mod cli_args;
mod error_map;
mod level_loader;
mod line_tui;
mod logging;
mod models;
mod report;
mod session_ops;
mod tui;
mod tui_actions;
mod tui_render;
mod tui_state;

pub(crate) use cli_args::{
    AgentArgs, AgentCommand, Cli, InspectArgs, LevelSelector, LevelsArgs, Mode, PlayArgs, TuiArgs,
};
pub(crate) use error_map::{
    emit_error, map_cli_json, map_cli_level_path, map_cli_level_read, map_cli_level_scan,
    map_cli_log_file, map_tui_io,
};
pub(crate) use level_loader::{load_catalog, load_selected_level, select_level_index};
#[cfg(test)]
pub(crate) use level_loader::{
    load_builtin_level, load_level_file, read_levels_from_dir, resolve_levels_dir,
};
pub(crate) use line_tui::run_tui_line_mode;
#[cfg(test)]
pub(crate) use line_tui::{handle_line_command, prompt_input_from, run_tui_line_mode_with_io};
pub(crate) use logging::{init_logging, LogTarget};
pub(crate) use models::{AgentMove, LevelOrigin, LineCommandAction, LoadedLevel};
pub(crate) use report::{board_text_lines, emit_session_report, layout_lines, outcome_text};
#[cfg(test)]
pub(crate) use report::session_report_lines;
pub(crate) use session_ops::{apply_move, create_session_for_level, parse_agent_move, LevelPlay};
#[cfg(test)]
pub(crate) use session_ops::move_label;

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, BlockSeqError> {
    match cli.command {
        Mode::Agent(args) => run_agent(args),
        Mode::Tui(args) => run_tui(args),
    }
}

fn run_agent(args: AgentArgs) -> Result<i32, BlockSeqError> {
    init_logging(LogTarget::Stderr)?;
    agent::run_agent(args)
}

fn run_tui(args: TuiArgs) -> Result<i32, BlockSeqError> {
    let line_mode = args.line || !tui::interactive_terminal();
    init_logging(match (&args.log_file, line_mode) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Off,
    })?;

    let catalog = load_catalog(args.levels_dir.as_deref())?;
    let index = select_level_index(&catalog, args.level.as_deref())?;
    let mut play = LevelPlay::new(catalog, index)?;

    if args.line {
        return run_tui_line_mode(&mut play);
    }
    tui::run_tui_ratatui_mode(&mut play)
}

#[cfg(test)]
mod tests;
