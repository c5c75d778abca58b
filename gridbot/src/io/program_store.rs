//! Saved programs (`*.json`) for replaying from the CLI.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::command::Action;

pub const PROGRAM_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/program/v1.schema.json"
));

/// On-disk program: an optional level id and the actions in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProgramFile {
    /// Level id the program was written for, if any.
    pub level: Option<u32>,
    pub commands: Vec<Action>,
}

/// Load and schema-check a program file.
pub fn load_program(path: &Path) -> Result<ProgramFile> {
    debug!(path = %path.display(), "loading program");
    let contents =
        fs::read_to_string(path).with_context(|| format!("read program {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse program {}", path.display()))?;
    super::validate_schema(PROGRAM_SCHEMA, &value, "program")
        .with_context(|| format!("validate program {}", path.display()))?;
    let program: ProgramFile = serde_json::from_value(value)
        .with_context(|| format!("deserialize program {}", path.display()))?;
    debug!(commands = program.commands.len(), "program loaded");
    Ok(program)
}

/// Atomically write a program file (temp file + rename).
pub fn write_program(path: &Path, program: &ProgramFile) -> Result<()> {
    debug!(path = %path.display(), commands = program.commands.len(), "writing program");
    let mut buf = serde_json::to_string_pretty(program)?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Position;

    #[test]
    fn program_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("programs").join("level5.json");
        let program = ProgramFile {
            level: Some(5),
            commands: vec![
                Action::GoTo(Position::new(0, 0)),
                Action::Glide(Position::new(4, 0)),
                Action::TurnLeft,
            ],
        };
        write_program(&path, &program).expect("write");
        assert_eq!(load_program(&path).expect("load"), program);
    }

    /// Pins the file format so saved programs stay readable.
    #[test]
    fn program_format_is_stable() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("p.json");
        let program = ProgramFile {
            level: None,
            commands: vec![Action::Move, Action::GoTo(Position::new(1, 2))],
        };
        write_program(&path, &program).expect("write");
        let contents = fs::read_to_string(&path).expect("read");
        let expected = "{\n  \"level\": null,\n  \"commands\": [\n    {\n      \"kind\": \"move\"\n    },\n    {\n      \"kind\": \"go_to\",\n      \"x\": 1,\n      \"y\": 2\n    }\n  ]\n}\n";
        assert_eq!(contents, expected);
    }

    #[test]
    fn go_to_without_target_fails_schema() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("bad.json");
        fs::write(&path, r#"{"commands": [{"kind": "go_to"}]}"#).expect("write");
        let err = load_program(&path).expect_err("schema");
        assert!(format!("{err:#}").contains("program schema validation failed"));
    }
}
