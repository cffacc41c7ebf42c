//! Motif configuration file handling
//!
//! Settings live in an optional `motif.toml` next to where the CLI runs.
//! Every section and field has a default, so a missing file or a partial
//! one is fine. Command-line flags override what the file says.

use anyhow::{Context, Result};
use motif_app::ShowcaseConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "motif.toml";

/// Contents of `motif.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotifConfig {
    pub viewport: ViewportConfig,
    pub run: RunConfig,
    pub log: LogConfig,
}

/// Canvas the showcase is laid out into
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        let showcase = ShowcaseConfig::default();
        Self {
            width: showcase.viewport_width,
            height: showcase.viewport_height,
        }
    }
}

/// Simulation defaults
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// Frames per second of virtual time
    pub fps: u32,
    /// Seconds simulated by `motif run`
    pub duration: f32,
    /// Where snapshots go when no output path is given
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            duration: 5.0,
            output_dir: PathBuf::from("target/motif"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directives, e.g. `motif_app=debug`
    pub filter: Option<String>,
}

impl MotifConfig {
    /// Load `motif.toml` from a directory, or defaults when there is none
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: MotifConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        if config.run.fps == 0 {
            anyhow::bail!("{}: run.fps must be at least 1", config_path.display());
        }
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize motif config")
    }

    pub fn showcase(&self) -> ShowcaseConfig {
        ShowcaseConfig {
            viewport_width: self.viewport.width,
            viewport_height: self.viewport.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = MotifConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, MotifConfig::default());
        assert_eq!(config.run.fps, 60);
        assert_eq!(config.viewport.width, 390.0);
        assert_eq!(config.log.filter, None);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[run]\nfps = 30\n\n[log]\nfilter = \"motif_app=debug\"\n",
        )
        .unwrap();

        let config = MotifConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.run.fps, 30);
        assert_eq!(config.run.duration, 5.0);
        assert_eq!(config.viewport, ViewportConfig::default());
        assert_eq!(config.log.filter.as_deref(), Some("motif_app=debug"));
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[viewport\nwidth = ").unwrap();

        let err = MotifConfig::load_from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_zero_fps_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[run]\nfps = 0\n").unwrap();
        assert!(MotifConfig::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = MotifConfig::default();
        config.viewport.width = 320.0;
        let text = config.to_toml().unwrap();
        assert!(text.contains("[viewport]"));
        assert_eq!(toml::from_str::<MotifConfig>(&text).unwrap(), config);
    }

    #[test]
    fn test_showcase_config() {
        let mut config = MotifConfig::default();
        config.viewport.height = 600.0;
        let showcase = config.showcase();
        assert_eq!(showcase.viewport_width, 390.0);
        assert_eq!(showcase.viewport_height, 600.0);
    }
}
