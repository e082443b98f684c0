use std::io::{self, BufRead, Write};

use bs_core::BlockSeqError;

use crate::{
    apply_move, board_text_lines, map_tui_io, parse_agent_move, LevelPlay, LineCommandAction,
};

const LINE_HELP: &str =
    "commands: place S R | detach S | drag S X Y | show | :next :prev :restart :help :quit";

pub(crate) fn run_tui_line_mode(play: &mut LevelPlay) -> Result<i32, BlockSeqError> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    run_tui_line_mode_with_io(play, &mut reader, &mut writer)
}

pub(crate) fn run_tui_line_mode_with_io(
    play: &mut LevelPlay,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<i32, BlockSeqError> {
    writeln!(writer, "blockseq line mode").map_err(map_tui_io)?;
    writeln!(writer, "{}", LINE_HELP).map_err(map_tui_io)?;
    write_board(play, writer)?;

    loop {
        let Some(raw) = prompt_input_from("> ", reader, writer)? else {
            return Ok(0);
        };
        let mut emitted = Vec::new();
        let mut emit = |line: String| emitted.push(line);
        let action = handle_line_command(raw.trim(), play, &mut emit)?;
        for line in emitted {
            writeln!(writer, "{}", line).map_err(map_tui_io)?;
        }
        match action {
            LineCommandAction::Quit => return Ok(0),
            LineCommandAction::Refresh => write_board(play, writer)?,
            LineCommandAction::Continue | LineCommandAction::NotHandled => {}
        }
    }
}

pub(crate) fn handle_line_command(
    raw: &str,
    play: &mut LevelPlay,
    emit: &mut dyn FnMut(String),
) -> Result<LineCommandAction, BlockSeqError> {
    match raw {
        "" => Ok(LineCommandAction::Continue),
        ":help" => {
            emit(LINE_HELP.to_string());
            Ok(LineCommandAction::Continue)
        }
        "show" => Ok(LineCommandAction::Refresh),
        ":restart" => {
            play.restart()?;
            emit("restarted".to_string());
            Ok(LineCommandAction::Refresh)
        }
        ":next" | ":prev" => {
            play.step(raw == ":next")?;
            emit(format!("level {}", play.position_label()));
            Ok(LineCommandAction::Refresh)
        }
        ":quit" => {
            emit("bye".to_string());
            Ok(LineCommandAction::Quit)
        }
        _ => {
            let outcome = parse_agent_move(raw)
                .and_then(|agent_move| apply_move(play.session_mut(), &agent_move));
            match outcome {
                Ok(label) => {
                    emit(label.to_string());
                    Ok(LineCommandAction::Refresh)
                }
                Err(error) => {
                    // Bad moves are reported and the loop keeps going.
                    emit(format!("error: {}", error));
                    Ok(LineCommandAction::NotHandled)
                }
            }
        }
    }
}

pub(crate) fn prompt_input_from(
    prefix: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<Option<String>, BlockSeqError> {
    write!(writer, "{}", prefix).map_err(map_tui_io)?;
    writer.flush().map_err(map_tui_io)?;
    let mut input = String::new();
    if reader.read_line(&mut input).map_err(map_tui_io)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

fn write_board(play: &LevelPlay, writer: &mut dyn Write) -> Result<(), BlockSeqError> {
    let level = play.level();
    writeln!(
        writer,
        "{} | {} ({}) [{}]",
        level.id,
        level.title,
        play.position_label(),
        play.session().fill_state().label()
    )
    .map_err(map_tui_io)?;
    for line in board_text_lines(play.session()) {
        writeln!(writer, "{}", line).map_err(map_tui_io)?;
    }
    Ok(())
}
