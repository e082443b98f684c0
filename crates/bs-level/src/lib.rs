mod builtin;
mod script;
mod validate;

use bs_core::defaults::{DEFAULT_DESTINATION_TEXT, DEFAULT_MAX_OPERATIONS};
use bs_core::{BlockSeqError, LevelDefinition};
use bs_runtime::{Level, LevelBuilder};
use tracing::info;

pub use builtin::{builtin_level_ids, builtin_level_json};
pub use validate::validate_definition;

use script::ScriptHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub max_operations: u64,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_operations: DEFAULT_MAX_OPERATIONS,
        }
    }
}

pub fn parse_level_json(text: &str) -> Result<LevelDefinition, BlockSeqError> {
    serde_json::from_str(text).map_err(|error| {
        BlockSeqError::new(
            "LEVEL_JSON_INVALID",
            format!("Level file is not valid level JSON: {}", error),
        )
    })
}

pub fn compile_level(definition: &LevelDefinition) -> Result<Level, BlockSeqError> {
    compile_level_with(definition, CompileOptions::default())
}

pub fn compile_level_with(
    definition: &LevelDefinition,
    options: CompileOptions,
) -> Result<Level, BlockSeqError> {
    validate_definition(definition)?;

    let host = ScriptHost::new(
        definition
            .variables
            .iter()
            .map(|variable| variable.name.clone())
            .collect(),
        options.max_operations,
    );
    let mut builder = LevelBuilder::new(definition.id.clone(), definition.title.clone());

    builder.start(definition.start.position, &definition.start.text)?;
    let initials = definition
        .variables
        .iter()
        .map(|variable| (variable.name.clone(), variable.initial.clone()))
        .collect();
    builder.set_start_action(host.start_action(initials, definition.start.action.as_deref())?)?;

    let fallback_text = definition
        .destination_text
        .as_deref()
        .unwrap_or(DEFAULT_DESTINATION_TEXT);
    for destination in &definition.destinations {
        let text = destination.text.as_deref().unwrap_or(fallback_text);
        builder.destination(destination.row, destination.position, text)?;
    }

    for source in &definition.sources {
        let id = builder.source(source.position, &source.text, source.row)?;
        let snippet = source.action.as_deref().unwrap_or_default();
        let owner = format!("source {} (\"{}\")", id, source.text);
        builder.set_source_action(id, host.source_action(snippet, owner)?)?;
    }

    builder.end(definition.end.position, &definition.end.text)?;
    builder.set_end_action(host.goal(definition.end.goal.as_deref().unwrap_or_default())?)?;

    let level = builder.build()?;
    info!(
        level = %level.id,
        rows = level.board.row_count(),
        sources = level.board.sources().len(),
        "level compiled"
    );
    Ok(level)
}

pub fn load_level_json(text: &str) -> Result<Level, BlockSeqError> {
    compile_level(&parse_level_json(text)?)
}

pub fn load_builtin_level(id: &str) -> Result<Level, BlockSeqError> {
    load_level_json(builtin_level_json(id)?)
}
