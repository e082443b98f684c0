use super::*;
use crate::tui_actions::{handle_key, handle_mouse};
use crate::tui_state::{BoardViewport, TuiUiState};

use bs_api::summarize_session;
use bs_core::{ExecutionOutcome, Point, Rect};
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!("blockseq-cli-{}-{}", name, nanos))
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent should be created");
    }
    fs::write(path, content).expect("file should be written");
}

fn shipped_levels_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("levels")
}

fn builtin_play() -> LevelPlay {
    let catalog = load_catalog(None).expect("builtin catalog should load");
    LevelPlay::new(catalog, 0).expect("first level should start")
}

fn builtin_session(id: &str) -> bs_runtime::PuzzleSession {
    let level = load_builtin_level(id).expect("builtin level");
    create_session_for_level(&level, None).expect("session should start")
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn parse_agent_move_accepts_colon_and_space_forms() {
    assert_eq!(
        parse_agent_move("place:1:2").expect("place"),
        AgentMove::Place { source: 1, row: 2 }
    );
    assert_eq!(
        parse_agent_move("place 1 2").expect("place with spaces"),
        AgentMove::Place { source: 1, row: 2 }
    );
    assert_eq!(
        parse_agent_move("detach:4").expect("detach"),
        AgentMove::Detach { source: 4 }
    );
    assert_eq!(
        parse_agent_move("drag:0:200:150.5").expect("drag"),
        AgentMove::Drag {
            source: 0,
            x: 200.0,
            y: 150.5
        }
    );
    assert_eq!(
        parse_agent_move("restart").expect("restart"),
        AgentMove::Restart
    );
}

#[test]
fn parse_agent_move_rejects_malformed_moves() {
    for raw in ["", "place:1", "place:a:1", "detach:-1", "drag:0:x:1", "drag:0:inf:1", "jump:1"] {
        let error = parse_agent_move(raw).expect_err("malformed move should fail");
        assert_eq!(error.code, "CLI_MOVE_INVALID", "move {:?}", raw);
    }
}

#[test]
fn apply_move_labels_what_happened() {
    let mut session = builtin_session("assign-and-add");

    let label = apply_move(&mut session, &AgentMove::Place { source: 0, row: 2 })
        .expect("wrong-row place");
    assert_eq!(label, "rejected");

    let label = apply_move(&mut session, &AgentMove::Place { source: 0, row: 1 })
        .expect("place");
    assert_eq!(label, "placed");

    let label =
        apply_move(&mut session, &AgentMove::Detach { source: 3 }).expect("detach home block");
    assert_eq!(label, "ignored");

    let label = apply_move(
        &mut session,
        &AgentMove::Drag {
            source: 0,
            x: 790.0,
            y: 490.0,
        },
    )
    .expect("drag seated block away");
    assert_eq!(label, "detached");
    assert_eq!(session.board().occupant(1), None);

    let label = apply_move(
        &mut session,
        &AgentMove::Drag {
            source: 2,
            x: 790.0,
            y: 490.0,
        },
    )
    .expect("drag home block away");
    assert_eq!(label, "returned");

    apply_move(&mut session, &AgentMove::Place { source: 1, row: 1 }).expect("place");
    let label = apply_move(&mut session, &AgentMove::Restart).expect("restart");
    assert_eq!(label, "restarted");
    assert_eq!(session.board().occupant(1), None);
}

#[test]
fn apply_move_propagates_unknown_rows_and_sources() {
    let mut session = builtin_session("swap");
    let error = apply_move(&mut session, &AgentMove::Place { source: 0, row: 9 })
        .expect_err("unknown row");
    assert_eq!(error.code, "BOARD_ROW_UNKNOWN");
    let error =
        apply_move(&mut session, &AgentMove::Detach { source: 42 }).expect_err("unknown source");
    assert_eq!(error.code, "BOARD_SOURCE_UNKNOWN");
}

#[test]
fn move_label_defaults_to_ignored() {
    assert_eq!(move_label(&[]), "ignored");
}

#[test]
fn session_report_lines_describe_a_solved_level() {
    let mut session = builtin_session("assign-and-add");
    for (source, row) in [(1, 1), (3, 2), (5, 3)] {
        apply_move(&mut session, &AgentMove::Place { source, row }).expect("place");
    }
    let lines = session_report_lines(&summarize_session(&session)).expect("report");

    assert_eq!(lines[0], "RESULT:OK");
    assert!(lines.contains(&"LEVEL:assign-and-add".to_string()));
    assert!(lines.contains(&"FILL:complete".to_string()));
    assert!(lines.contains(&"OUTCOME:completed".to_string()));
    assert!(lines.contains(&"VERDICT:SUCCESS".to_string()));
    assert!(lines.contains(&"HALTED_AT:NONE".to_string()));
    assert!(lines.contains(&"FAULT_JSON:null".to_string()));
    assert!(lines.contains(&"INVOKED:0,1,2,3,4".to_string()));
    assert!(lines.contains(&"SLOT:2:3:\"x = b;\"".to_string()));
    let vars = lines
        .iter()
        .find_map(|line| line.strip_prefix("VAR_JSON:"))
        .expect("variables line");
    let vars: serde_json::Value = serde_json::from_str(vars).expect("variables json");
    assert_eq!(vars["x"], 10);
}

#[test]
fn session_report_lines_describe_gaps_and_faults() {
    let mut session = builtin_session("assign-and-add");
    let lines = session_report_lines(&summarize_session(&session)).expect("report");
    assert!(lines.contains(&"OUTCOME:halted".to_string()));
    assert!(lines.contains(&"HALTED_AT:1".to_string()));
    assert!(lines.contains(&"VERDICT:NONE".to_string()));
    assert!(lines.contains(&"SLOT:1:-:null".to_string()));

    for (source, row) in [(0, 1), (3, 2), (4, 3)] {
        apply_move(&mut session, &AgentMove::Place { source, row }).expect("place");
    }
    assert!(matches!(
        session.last_report().map(|report| &report.outcome),
        Some(ExecutionOutcome::Faulted { index: 3, .. })
    ));
    let lines = session_report_lines(&summarize_session(&session)).expect("report");
    let fault = lines
        .iter()
        .find_map(|line| line.strip_prefix("FAULT_JSON:"))
        .expect("fault line");
    let fault: serde_json::Value = serde_json::from_str(fault).expect("fault json");
    assert_eq!(fault["index"], 3);
    assert!(fault["message"].is_string());
}

#[test]
fn layout_lines_list_every_block() {
    let level = load_builtin_level("swap").expect("swap");
    let session = create_session_for_level(&level, None).expect("session");
    let lines = layout_lines(&level, &session).expect("layout");

    assert_eq!(lines[0], "RESULT:OK");
    assert!(lines.contains(&"LEVEL:swap".to_string()));
    assert!(lines.contains(&"ORIGIN:builtin".to_string()));
    assert!(lines.contains(&"ROWS:3".to_string()));
    assert_eq!(
        lines.iter().filter(|line| line.starts_with("SOURCE:")).count(),
        6
    );
    assert_eq!(
        lines
            .iter()
            .filter(|line| line.starts_with("DESTINATION:"))
            .count(),
        3
    );
    assert!(lines.iter().any(|line| line.starts_with("START:")));
    assert!(lines.iter().any(|line| line.starts_with("END:")));
}

#[test]
fn outcome_text_reads_each_outcome() {
    assert_eq!(outcome_text(None), "not run");
    assert_eq!(
        outcome_text(Some(&ExecutionOutcome::Halted { gap: 2 })),
        "halted before entry 2"
    );
    assert_eq!(
        outcome_text(Some(&ExecutionOutcome::Completed {
            verdict: bs_core::Verdict::Failure
        })),
        "FAILED"
    );
    assert!(outcome_text(Some(&ExecutionOutcome::Faulted {
        index: 3,
        message: "boom".to_string()
    }))
    .contains("entry 3: boom"));
}

#[test]
fn resolve_levels_dir_validates_existence_and_directory() {
    let missing = temp_path("missing-dir");
    let error = resolve_levels_dir(missing.to_string_lossy().as_ref())
        .expect_err("missing path should fail");
    assert_eq!(error.code, "CLI_LEVELS_NOT_FOUND");

    let file_path = temp_path("plain-file");
    write_file(&file_path, "x");
    let error = resolve_levels_dir(file_path.to_string_lossy().as_ref())
        .expect_err("file path should fail");
    assert_eq!(error.code, "CLI_LEVELS_NOT_DIR");
}

#[test]
fn read_levels_from_dir_finds_shipped_levels_in_order() {
    let levels = read_levels_from_dir(&shipped_levels_dir()).expect("shipped levels");
    let ids = levels.iter().map(|level| level.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["assign-and-add", "swap"]);
    assert!(matches!(levels[0].origin, LevelOrigin::File(_)));
}

#[test]
fn read_levels_from_dir_rejects_empty_and_invalid_trees() {
    let empty = temp_path("empty-levels");
    fs::create_dir_all(&empty).expect("dir");
    write_file(&empty.join("notes.json"), "{}");
    let error = read_levels_from_dir(&empty).expect_err("no level files");
    assert_eq!(error.code, "CLI_LEVELS_EMPTY");

    let broken = temp_path("broken-levels");
    write_file(&broken.join("bad.level.json"), "{ not json");
    let error = read_levels_from_dir(&broken).expect_err("bad json");
    assert_eq!(error.code, "LEVEL_JSON_INVALID");
}

#[test]
fn load_level_file_reports_missing_files() {
    let error = load_level_file(&temp_path("absent.level.json")).expect_err("missing file");
    assert_eq!(error.code, "CLI_LEVEL_READ");
}

#[test]
fn load_selected_level_prefers_file_over_builtin() {
    let path = shipped_levels_dir()
        .join("basics")
        .join("swap.level.json");
    let selector = LevelSelector {
        level_file: Some(path.to_string_lossy().to_string()),
        level: None,
    };
    let level = load_selected_level(&selector).expect("file level");
    assert_eq!(level.id, "swap");
    assert!(matches!(level.origin, LevelOrigin::File(_)));

    let selector = LevelSelector {
        level_file: None,
        level: Some("assign-and-add".to_string()),
    };
    let level = load_selected_level(&selector).expect("builtin level");
    assert_eq!(level.origin, LevelOrigin::Builtin);

    let selector = LevelSelector {
        level_file: None,
        level: None,
    };
    let error = load_selected_level(&selector).expect_err("nothing selected");
    assert_eq!(error.code, "CLI_LEVEL_REQUIRED");
}

#[test]
fn select_level_index_finds_ids_and_reports_unknown() {
    let catalog = load_catalog(None).expect("catalog");
    assert_eq!(select_level_index(&catalog, None).expect("default"), 0);
    assert_eq!(select_level_index(&catalog, Some("swap")).expect("swap"), 1);
    let error = select_level_index(&catalog, Some("nope")).expect_err("unknown id");
    assert_eq!(error.code, "CLI_LEVEL_UNKNOWN");
    assert!(error.message.contains("assign-and-add"));
}

#[test]
fn level_play_steps_wrap_around() {
    let mut play = builtin_play();
    assert_eq!(play.level().id, "assign-and-add");
    assert_eq!(play.position_label(), "1/2");

    play.step(true).expect("next");
    assert_eq!(play.level().id, "swap");
    play.step(true).expect("wrap forward");
    assert_eq!(play.level().id, "assign-and-add");
    play.step(false).expect("wrap back");
    assert_eq!(play.level().id, "swap");
    assert_eq!(play.session().id(), "swap");
}

#[test]
fn level_play_rejects_out_of_range_index() {
    let catalog = load_catalog(None).expect("catalog");
    let error = LevelPlay::new(catalog, 5)
        .err()
        .expect("index past the end should fail");
    assert_eq!(error.code, "CLI_LEVEL_INDEX");
}

#[test]
fn board_text_lines_show_rows_and_sources() {
    let mut session = builtin_session("assign-and-add");
    apply_move(&mut session, &AgentMove::Place { source: 1, row: 1 }).expect("place");
    let lines = board_text_lines(&session);

    assert!(lines.contains(&"  row 1: [#1] int b = 5;".to_string()));
    assert!(lines.contains(&"  row 2: (empty)".to_string()));
    assert!(lines.contains(&"    #1 int b = 5; (in row 1)".to_string()));
    assert!(lines.contains(&"    #0 int a = 3; (home)".to_string()));
    assert!(lines.contains(&"  outcome: halted before entry 2".to_string()));
}

#[test]
fn handle_line_command_covers_builtin_commands() {
    let mut play = builtin_play();
    let mut emitted = Vec::new();
    let mut emit = |line: String| emitted.push(line);

    assert_eq!(
        handle_line_command("", &mut play, &mut emit).expect("blank"),
        LineCommandAction::Continue
    );
    assert_eq!(
        handle_line_command(":help", &mut play, &mut emit).expect("help"),
        LineCommandAction::Continue
    );
    assert_eq!(
        handle_line_command("show", &mut play, &mut emit).expect("show"),
        LineCommandAction::Refresh
    );
    assert_eq!(
        handle_line_command("place 1 1", &mut play, &mut emit).expect("place"),
        LineCommandAction::Refresh
    );
    assert_eq!(
        handle_line_command(":restart", &mut play, &mut emit).expect("restart"),
        LineCommandAction::Refresh
    );
    assert_eq!(
        handle_line_command(":next", &mut play, &mut emit).expect("next"),
        LineCommandAction::Refresh
    );
    assert_eq!(
        handle_line_command("place 0 7", &mut play, &mut emit).expect("bad row"),
        LineCommandAction::NotHandled
    );
    assert_eq!(
        handle_line_command(":quit", &mut play, &mut emit).expect("quit"),
        LineCommandAction::Quit
    );

    assert!(emitted[0].starts_with("commands:"));
    assert_eq!(emitted[1], "placed");
    assert_eq!(emitted[2], "restarted");
    assert_eq!(emitted[3], "level 2/2");
    assert!(emitted[4].starts_with("error: BOARD_ROW_UNKNOWN"));
    assert_eq!(emitted[5], "bye");
    assert_eq!(play.level().id, "swap");
}

#[test]
fn line_mode_solves_a_level_from_scripted_input() {
    let mut play = builtin_play();
    let mut reader = Cursor::new(b"place 1 1\nplace 3 2\nplace 5 3\n:quit\n".to_vec());
    let mut writer = Vec::new();

    let code = run_tui_line_mode_with_io(&mut play, &mut reader, &mut writer).expect("line mode");
    assert_eq!(code, 0);

    let output = String::from_utf8(writer).expect("utf-8 output");
    assert!(output.starts_with("blockseq line mode"));
    assert!(output.contains("assign-and-add | Assign and add (1/2) [pristine]"));
    assert!(output.contains("outcome: SUCCESS"));
    assert!(output.contains("x=10"));
    assert!(output.trim_end().ends_with("bye"));
}

#[test]
fn line_mode_stops_at_end_of_input() {
    let mut play = builtin_play();
    let mut reader = Cursor::new(b"place 0 1\n".to_vec());
    let mut writer = Vec::new();
    let code = run_tui_line_mode_with_io(&mut play, &mut reader, &mut writer).expect("line mode");
    assert_eq!(code, 0);
    assert_eq!(play.session().board().occupant(1), Some(bs_core::SourceId(0)));
}

#[test]
fn prompt_input_strips_line_endings_and_detects_eof() {
    let mut reader = Cursor::new(b"place 1 1\r\n".to_vec());
    let mut writer = Vec::new();
    let line = prompt_input_from("> ", &mut reader, &mut writer).expect("prompt");
    assert_eq!(line.as_deref(), Some("place 1 1"));
    assert_eq!(writer, b"> ");

    let line = prompt_input_from("> ", &mut reader, &mut writer).expect("prompt at eof");
    assert_eq!(line, None);
}

#[test]
fn viewport_maps_cells_and_world_both_ways() {
    let viewport = BoardViewport::fit(0, 0, 160, 28, false);
    assert_eq!(viewport.row, 2);
    assert_eq!(viewport.rows, 25);

    let slot = Rect::centered(Point::new(200.0, 150.0), bs_core::Size::block());
    let cells = viewport.to_cells(slot);
    assert_eq!(cells.col, 15);
    assert_eq!(cells.row, 2 + 6);
    assert_eq!(cells.width, 50);
    assert_eq!(cells.height, 4);

    let world = viewport.to_world(cells.col + 25, cells.row + 2);
    assert!(slot.contains(world), "{:?} should land in {:?}", world, slot);

    let with_help = BoardViewport::fit(0, 0, 160, 28, true);
    assert_eq!(with_help.rows, 24);
}

#[test]
fn keys_quit_restart_and_switch_levels() {
    let mut play = builtin_play();
    let mut ui = TuiUiState::new();

    apply_move(play.session_mut(), &AgentMove::Place { source: 0, row: 1 }).expect("place");
    assert!(!handle_key(key(KeyCode::Char('r')), &mut play, &mut ui).expect("restart"));
    assert_eq!(ui.status, "restarted");
    assert_eq!(play.session().board().occupant(1), None);

    assert!(!handle_key(key(KeyCode::Char('h')), &mut play, &mut ui).expect("help"));
    assert!(ui.help_visible);

    assert!(!handle_key(key(KeyCode::Char('n')), &mut play, &mut ui).expect("next"));
    assert_eq!(play.level().id, "swap");
    assert!(!handle_key(key(KeyCode::Char('p')), &mut play, &mut ui).expect("previous"));
    assert_eq!(play.level().id, "assign-and-add");

    assert!(handle_key(key(KeyCode::Char('q')), &mut play, &mut ui).expect("quit"));
    assert!(handle_key(key(KeyCode::Esc), &mut play, &mut ui).expect("esc"));
    assert!(handle_key(
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        &mut play,
        &mut ui
    )
    .expect("ctrl-c"));
}

#[test]
fn mouse_drag_places_and_right_click_detaches() {
    let mut play = builtin_play();
    let mut ui = TuiUiState::new();
    ui.viewport = BoardViewport {
        col: 0,
        row: 0,
        cols: 800,
        rows: 500,
    };

    handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 450, 150), &mut play, &mut ui)
        .expect("press");
    assert_eq!(ui.status, "dragging");
    handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 200, 150), &mut play, &mut ui)
        .expect("drag");
    assert_eq!(ui.status, "over row 1");
    handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 200, 150), &mut play, &mut ui)
        .expect("release");
    assert_eq!(ui.status, "placed in row 1: halted before entry 2");
    assert_eq!(play.session().board().occupant(1), Some(bs_core::SourceId(0)));

    handle_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 200, 150), &mut play, &mut ui)
        .expect("right click");
    assert_eq!(ui.status, "cleared row 1: halted before entry 1");
    assert_eq!(play.session().board().occupant(1), None);

    handle_mouse(mouse(MouseEventKind::Moved, 10, 10), &mut play, &mut ui).expect("hover");
    assert_eq!(ui.status, "cleared row 1: halted before entry 1");
}

#[test]
fn run_cli_reports_errors_and_usage() {
    assert_eq!(run_cli_from_args(["blockseq", "agent", "levels"]), 0);
    assert_eq!(
        run_cli_from_args(["blockseq", "agent", "play", "--level", "missing"]),
        1
    );
    assert_eq!(run_cli_from_args(["blockseq"]), 2);
    assert_eq!(
        run_cli_from_args([
            "blockseq",
            "agent",
            "play",
            "--level",
            "swap",
            "--level-file",
            "x.level.json"
        ]),
        2
    );
}
