use bs_core::BlockSeqError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> BlockSeqError {
    BlockSeqError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: BlockSeqError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).expect("string json")
    );
    1
}

pub(crate) fn map_tui_io(error: std::io::Error) -> BlockSeqError {
    map_error("TUI_IO", error)
}

pub(crate) fn map_cli_level_path(error: std::io::Error) -> BlockSeqError {
    map_error("CLI_LEVEL_PATH", error)
}

pub(crate) fn map_cli_level_scan(error: walkdir::Error) -> BlockSeqError {
    map_error("CLI_LEVEL_SCAN", error)
}

pub(crate) fn map_cli_level_read(error: std::io::Error) -> BlockSeqError {
    map_error("CLI_LEVEL_READ", error)
}

pub(crate) fn map_cli_log_file(error: std::io::Error) -> BlockSeqError {
    map_error("CLI_LOG_FILE", error)
}

pub(crate) fn map_cli_json(error: serde_json::Error) -> BlockSeqError {
    map_error("CLI_JSON", error)
}
