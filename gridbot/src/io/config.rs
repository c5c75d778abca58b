//! Game configuration stored in `gridbot.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::command::CommandKind;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "gridbot.toml";

/// Upper bound for any single pause.
const MAX_PAUSE_MS: u64 = 60_000;

/// Game configuration (TOML).
///
/// Missing fields default to the shipped values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Custom level catalog (JSON). The built-in table is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    pub timing: TimingConfig,
}

/// Pause held before each command, per kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimingConfig {
    pub move_ms: u64,
    pub turn_ms: u64,
    /// GoTo is the quick jump.
    pub go_to_ms: u64,
    /// Glide is held longest to read as continuous motion.
    pub glide_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            move_ms: 800,
            turn_ms: 800,
            go_to_ms: 300,
            glide_ms: 1200,
        }
    }
}

impl TimingConfig {
    pub fn pause_for(&self, kind: CommandKind) -> Duration {
        let ms = match kind {
            CommandKind::Move => self.move_ms,
            CommandKind::TurnLeft | CommandKind::TurnRight => self.turn_ms,
            CommandKind::GoTo => self.go_to_ms,
            CommandKind::Glide => self.glide_ms,
        };
        Duration::from_millis(ms)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("move_ms", self.move_ms),
            ("turn_ms", self.turn_ms),
            ("go_to_ms", self.go_to_ms),
            ("glide_ms", self.glide_ms),
        ] {
            if value == 0 {
                return Err(anyhow!("timing.{name} must be > 0"));
            }
            if value > MAX_PAUSE_MS {
                return Err(anyhow!("timing.{name} must be <= {MAX_PAUSE_MS}"));
            }
        }
        Ok(())
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        self.timing.validate()
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `GameConfig::default()`.
pub fn load_config(path: &Path) -> Result<GameConfig> {
    if !path.exists() {
        let cfg = GameConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: GameConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &GameConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("gridbot.toml");
        let cfg = GameConfig {
            catalog_path: Some(PathBuf::from("levels.json")),
            timing: TimingConfig {
                glide_ms: 2000,
                ..TimingConfig::default()
            },
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("gridbot.toml");
        fs::write(&path, "[timing]\nmove_ms = 100\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.timing.move_ms, 100);
        assert_eq!(cfg.timing.go_to_ms, 300);
        assert_eq!(cfg.catalog_path, None);
    }

    #[test]
    fn zero_pause_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("gridbot.toml");
        fs::write(&path, "[timing]\nturn_ms = 0\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(format!("{err:#}").contains("timing.turn_ms must be > 0"));
    }

    #[test]
    fn default_pauses_put_go_to_first_and_glide_last() {
        let timing = TimingConfig::default();
        let go_to = timing.pause_for(CommandKind::GoTo);
        let glide = timing.pause_for(CommandKind::Glide);
        for kind in [CommandKind::Move, CommandKind::TurnLeft, CommandKind::TurnRight] {
            assert!(go_to < timing.pause_for(kind));
            assert!(glide > timing.pause_for(kind));
        }
    }
}
