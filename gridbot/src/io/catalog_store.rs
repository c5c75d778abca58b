//! Catalog load/save helpers with schema + invariant validation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::catalog::LevelCatalog;
use crate::core::level::Level;

pub const LEVELS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/levels/v1.schema.json"
));

/// Load and validate a level catalog from a JSON file (schema + invariants).
pub fn load_catalog(path: &Path) -> Result<LevelCatalog> {
    debug!(path = %path.display(), "loading catalog");
    let contents =
        fs::read_to_string(path).with_context(|| format!("read catalog {}", path.display()))?;
    parse_catalog(&contents).with_context(|| format!("load catalog {}", path.display()))
}

/// Parse and validate catalog JSON text.
pub fn parse_catalog(raw: &str) -> Result<LevelCatalog> {
    let value: Value = serde_json::from_str(raw).context("parse catalog json")?;
    super::validate_schema(LEVELS_SCHEMA, &value, "catalog")?;
    let levels: Vec<Level> = serde_json::from_value(value).context("deserialize levels")?;
    let catalog = LevelCatalog::from_levels(levels)?;
    debug!(levels = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Load the catalog at `path`, or the built-in table when `None`.
pub fn load_catalog_or_builtin(path: Option<&Path>) -> Result<LevelCatalog> {
    match path {
        Some(path) => load_catalog(path),
        None => Ok(LevelCatalog::builtin()),
    }
}

/// Atomically write a catalog as pretty JSON.
pub fn write_catalog(path: &Path, catalog: &LevelCatalog) -> Result<()> {
    let mut buf = serde_json::to_string_pretty(catalog.levels()).context("serialize catalog")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_round_trips_through_schema() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("levels.json");
        write_catalog(&path, &LevelCatalog::builtin()).expect("write");
        let loaded = load_catalog(&path).expect("load");
        assert_eq!(loaded, LevelCatalog::builtin());
    }

    #[test]
    fn schema_rejects_unknown_command_kind() {
        let raw = r#"[{
            "id": 1, "title": "t", "message": "", "grid_size": 3,
            "start": {"x": 0, "y": 0}, "start_direction": "N",
            "goal": {"x": 2, "y": 2}, "allowed_commands": ["teleport"]
        }]"#;
        let err = parse_catalog(raw).expect_err("schema");
        assert!(format!("{err:#}").contains("catalog schema validation failed"));
    }

    #[test]
    fn invariants_run_after_schema() {
        let raw = r#"[{
            "id": 1, "title": "t", "message": "", "grid_size": 3,
            "start": {"x": 0, "y": 0}, "start_direction": "N",
            "goal": {"x": 3, "y": 0}, "allowed_commands": ["move"]
        }]"#;
        let err = parse_catalog(raw).expect_err("invariants");
        assert!(format!("{err:#}").contains("goal (3,0) outside board"));
    }

    #[test]
    fn missing_path_uses_builtin() {
        let catalog = load_catalog_or_builtin(None).expect("builtin");
        assert_eq!(catalog.len(), 5);
    }
}
