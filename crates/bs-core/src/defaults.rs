//! Layout and evaluation constants shared by every layer.

pub const BLOCK_WIDTH: f32 = 250.0;
pub const BLOCK_HEIGHT: f32 = 75.0;

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 500.0;

pub const DEFAULT_DESTINATION_TEXT: &str = "// Drag a Source Block here.";

pub const DEFAULT_MAX_OPERATIONS: u64 = 10_000;

pub const LEVEL_SCHEMA_V1: &str = "blockseq-level.v1";
