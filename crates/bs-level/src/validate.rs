use std::collections::BTreeSet;
use std::sync::OnceLock;

use bs_core::defaults::{CANVAS_HEIGHT, CANVAS_WIDTH, LEVEL_SCHEMA_V1};
use bs_core::{BlockSeqError, LevelDefinition, Point};
use bs_runtime::validate_rows;
use regex::Regex;

pub fn validate_definition(definition: &LevelDefinition) -> Result<(), BlockSeqError> {
    if definition.schema_version != LEVEL_SCHEMA_V1 {
        return Err(BlockSeqError::new(
            "LEVEL_SCHEMA_UNSUPPORTED",
            format!(
                "Level schema \"{}\" is not supported; expected \"{}\".",
                definition.schema_version, LEVEL_SCHEMA_V1
            ),
        ));
    }
    if !level_id_regex().is_match(&definition.id) {
        return Err(BlockSeqError::new(
            "LEVEL_ID_INVALID",
            format!(
                "Level id \"{}\" must be lowercase letters, digits and dashes.",
                definition.id
            ),
        ));
    }
    if definition.title.trim().is_empty() {
        return Err(BlockSeqError::new(
            "LEVEL_TITLE_EMPTY",
            format!("Level \"{}\" has an empty title.", definition.id),
        ));
    }

    let mut seen = BTreeSet::new();
    for variable in &definition.variables {
        if !variable_name_regex().is_match(&variable.name) {
            return Err(BlockSeqError::new(
                "LEVEL_VARIABLE_INVALID",
                format!("Variable name \"{}\" is not an identifier.", variable.name),
            ));
        }
        if RESERVED_WORDS.contains(&variable.name.as_str()) {
            return Err(BlockSeqError::new(
                "LEVEL_VARIABLE_INVALID",
                format!(
                    "Variable name \"{}\" is a reserved script keyword.",
                    variable.name
                ),
            ));
        }
        if !seen.insert(variable.name.as_str()) {
            return Err(BlockSeqError::new(
                "LEVEL_VARIABLE_DUPLICATE",
                format!("Variable \"{}\" is declared more than once.", variable.name),
            ));
        }
    }

    let rows = definition
        .destinations
        .iter()
        .map(|destination| destination.row)
        .collect::<Vec<_>>();
    let row_count = validate_rows(&rows)?;

    for (index, source) in definition.sources.iter().enumerate() {
        if source.row == 0 || source.row > row_count {
            return Err(BlockSeqError::new(
                "LEVEL_BINDING_UNKNOWN_ROW",
                format!(
                    "Source #{} (\"{}\") is bound to row {}, but rows run 1..={}.",
                    index, source.text, source.row, row_count
                ),
            ));
        }
        if is_blank(source.action.as_deref()) {
            return Err(BlockSeqError::new(
                "LEVEL_ACTION_MISSING",
                format!("Source #{} (\"{}\") has no action.", index, source.text),
            ));
        }
    }
    for row in 1..=row_count {
        if !definition.sources.iter().any(|source| source.row == row) {
            return Err(BlockSeqError::new(
                "LEVEL_ROW_UNREACHABLE",
                format!("No source is bound to destination row {}.", row),
            ));
        }
    }
    if is_blank(definition.end.goal.as_deref()) {
        return Err(BlockSeqError::new(
            "LEVEL_ACTION_MISSING",
            format!("End block of level \"{}\" has no goal.", definition.id),
        ));
    }

    let positions = std::iter::once(("start", definition.start.position))
        .chain(std::iter::once(("end", definition.end.position)))
        .chain(
            definition
                .destinations
                .iter()
                .map(|destination| ("destination", destination.position)),
        )
        .chain(
            definition
                .sources
                .iter()
                .map(|source| ("source", source.position)),
        );
    for (owner, position) in positions {
        if !on_canvas(position) {
            return Err(BlockSeqError::new(
                "LEVEL_POSITION_OFF_CANVAS",
                format!(
                    "The {} block at ({}, {}) lies outside the {}x{} canvas.",
                    owner, position.x, position.y, CANVAS_WIDTH, CANVAS_HEIGHT
                ),
            ));
        }
    }

    Ok(())
}

// Rhai keywords plus the words rhai reserves for future syntax.
const RESERVED_WORDS: &[&str] = &[
    "_", "as", "async", "await", "break", "call", "case", "catch", "const", "continue",
    "curry", "debug", "default", "do", "else", "eval", "exit", "export", "false", "fn",
    "Fn", "for", "global", "go", "goto", "if", "import", "in", "is_def_fn", "is_def_var",
    "is_shared", "let", "loop", "match", "module", "new", "nil", "null", "package",
    "print", "private", "protected", "public", "return", "shared", "spawn", "static",
    "super", "switch", "sync", "this", "thread", "throw", "true", "try", "type_of",
    "until", "use", "var", "void", "while", "with", "yield",
];

fn is_blank(snippet: Option<&str>) -> bool {
    snippet.map(str::trim).unwrap_or_default().is_empty()
}

fn on_canvas(point: Point) -> bool {
    (0.0..=CANVAS_WIDTH).contains(&point.x) && (0.0..=CANVAS_HEIGHT).contains(&point.y)
}

fn level_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("level id regex"))
}

fn variable_name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("variable name regex"))
}
