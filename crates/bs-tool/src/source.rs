use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{BsToolError, LevelCase, CASE_SCHEMA_V1};

pub fn discover_cases(root: &Path) -> Result<Vec<PathBuf>, BsToolError> {
    let mut cases = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.to_string_lossy().ends_with(".case.json"))
        .collect::<Vec<_>>();

    if cases.is_empty() {
        return Err(BsToolError::CaseEmpty {
            path: root.to_path_buf(),
        });
    }
    cases.sort();
    Ok(cases)
}

pub fn read_level_file(path: &Path) -> Result<String, BsToolError> {
    fs::read_to_string(path).map_err(|source| BsToolError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_case(case_path: &Path) -> Result<LevelCase, BsToolError> {
    let raw = fs::read_to_string(case_path).map_err(|source| BsToolError::ReadFile {
        path: case_path.to_path_buf(),
        source,
    })?;
    let parsed: LevelCase = serde_json::from_str(&raw).map_err(|source| BsToolError::ParseCase {
        path: case_path.to_path_buf(),
        source,
    })?;

    if parsed.schema_version != CASE_SCHEMA_V1 {
        return Err(BsToolError::InvalidSchemaVersion {
            expected: CASE_SCHEMA_V1.to_string(),
            found: parsed.schema_version,
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod source_tests {
    use super::*;

    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should move forward")
            .as_nanos();
        std::env::temp_dir().join(format!("bs-tool-{}-{}", name, nanos))
    }

    fn write_file(path: &Path, content: &str) {
        let parent = path.parent().expect("path should have parent");
        fs::create_dir_all(parent).expect("parent dir should be created");
        fs::write(path, content).expect("file should be written");
    }

    #[test]
    fn discover_cases_only_collects_case_files() {
        let root = temp_dir("discover");
        write_file(&root.join("b.case.json"), "{}");
        write_file(&root.join("nested/a.case.json"), "{}");
        write_file(&root.join("level.level.json"), "{}");
        write_file(&root.join("notes.json"), "{}");

        let cases = discover_cases(&root).expect("scan should pass");
        assert_eq!(cases.len(), 2);
        assert!(cases[0].ends_with("b.case.json"));
        assert!(cases[1].ends_with("nested/a.case.json"));
    }

    #[test]
    fn discover_cases_fails_when_nothing_matches() {
        let root = temp_dir("discover-empty");
        write_file(&root.join("level.level.json"), "{}");
        let error = discover_cases(&root).expect_err("empty dir should fail");
        assert!(matches!(error, BsToolError::CaseEmpty { .. }));
    }

    #[test]
    fn read_case_reports_read_parse_and_schema_errors() {
        let root = temp_dir("case-errors");
        fs::create_dir_all(&root).expect("root should be created");

        let missing = read_case(&root.join("missing.case.json")).expect_err("missing case");
        assert!(matches!(missing, BsToolError::ReadFile { .. }));

        let bad_json = root.join("bad.case.json");
        write_file(&bad_json, "{");
        let parse_error = read_case(&bad_json).expect_err("parse should fail");
        assert!(matches!(parse_error, BsToolError::ParseCase { .. }));

        let bad_schema = root.join("schema.case.json");
        write_file(
            &bad_schema,
            r#"{
  "schemaVersion": "v0",
  "level": "x.level.json",
  "expected": {"outcome": {"kind": "halted", "at": 1}}
}"#,
        );
        let schema_error = read_case(&bad_schema).expect_err("schema should fail");
        assert!(matches!(
            schema_error,
            BsToolError::InvalidSchemaVersion { .. }
        ));
    }
}
