use std::fs;
use std::path::{Path, PathBuf};

use bs_api::{builtin_level_ids, builtin_level_json, load_definition, LevelSource};
use bs_core::BlockSeqError;
use tracing::debug;
use walkdir::WalkDir;

use crate::{
    map_cli_level_path, map_cli_level_read, map_cli_level_scan, LevelOrigin, LevelSelector,
    LoadedLevel,
};

const LEVEL_FILE_SUFFIX: &str = ".level.json";

pub(crate) fn load_selected_level(selector: &LevelSelector) -> Result<LoadedLevel, BlockSeqError> {
    match (&selector.level_file, &selector.level) {
        (Some(path), _) => load_level_file(&resolve_path(path)?),
        (None, Some(id)) => load_builtin_level(id),
        (None, None) => Err(BlockSeqError::new(
            "CLI_LEVEL_REQUIRED",
            "Pass --level-file PATH or --level ID.",
        )),
    }
}

pub(crate) fn load_catalog(levels_dir: Option<&str>) -> Result<Vec<LoadedLevel>, BlockSeqError> {
    match levels_dir {
        Some(dir) => read_levels_from_dir(&resolve_levels_dir(dir)?),
        None => builtin_level_ids()
            .into_iter()
            .map(load_builtin_level)
            .collect(),
    }
}

pub(crate) fn select_level_index(
    catalog: &[LoadedLevel],
    id: Option<&str>,
) -> Result<usize, BlockSeqError> {
    let Some(id) = id else {
        return Ok(0);
    };
    catalog
        .iter()
        .position(|level| level.id == id)
        .ok_or_else(|| {
            BlockSeqError::new(
                "CLI_LEVEL_UNKNOWN",
                format!(
                    "Level \"{}\" is not in the catalog. Known: {}.",
                    id,
                    catalog
                        .iter()
                        .map(|level| level.id.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )
        })
}

pub(crate) fn resolve_levels_dir(levels_dir: &str) -> Result<PathBuf, BlockSeqError> {
    let absolute = resolve_path(levels_dir)?;

    if !absolute.exists() {
        return Err(BlockSeqError::new(
            "CLI_LEVELS_NOT_FOUND",
            format!("levels-dir does not exist: {}", absolute.display()),
        ));
    }
    if !absolute.is_dir() {
        return Err(BlockSeqError::new(
            "CLI_LEVELS_NOT_DIR",
            format!("levels-dir is not a directory: {}", absolute.display()),
        ));
    }

    Ok(absolute)
}

pub(crate) fn read_levels_from_dir(root: &Path) -> Result<Vec<LoadedLevel>, BlockSeqError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(map_cli_level_scan)?;
        if entry.file_type().is_file()
            && entry.path().to_string_lossy().ends_with(LEVEL_FILE_SUFFIX)
        {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(BlockSeqError::new(
            "CLI_LEVELS_EMPTY",
            format!("No {} files under {}", LEVEL_FILE_SUFFIX, root.display()),
        ));
    }

    paths.iter().map(|path| load_level_file(path)).collect()
}

pub(crate) fn load_level_file(path: &Path) -> Result<LoadedLevel, BlockSeqError> {
    let json = fs::read_to_string(path).map_err(map_cli_level_read)?;
    let level = header(json, LevelOrigin::File(path.to_path_buf()))?;
    debug!(level = %level.id, path = %path.display(), "level file read");
    Ok(level)
}

pub(crate) fn load_builtin_level(id: &str) -> Result<LoadedLevel, BlockSeqError> {
    header(builtin_level_json(id)?.to_string(), LevelOrigin::Builtin)
}

fn header(json: String, origin: LevelOrigin) -> Result<LoadedLevel, BlockSeqError> {
    let definition = load_definition(&LevelSource::Json(json.clone()))?;
    Ok(LoadedLevel {
        id: definition.id,
        title: definition.title,
        json,
        origin,
    })
}

fn resolve_path(raw: &str) -> Result<PathBuf, BlockSeqError> {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        return Ok(path);
    }
    Ok(std::env::current_dir()
        .map_err(map_cli_level_path)?
        .join(path))
}
