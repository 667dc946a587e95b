//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/vdirs/vdirs.toml`
//! 3. Local config: `<dir>/.vdirs.toml` (usually the working directory)
//! 4. Environment variables: `VDIRS_*` prefix
//!
//! CLI flags are applied on top by the caller.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for vdirs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory for per-run log files (default: logs)
    pub log_dir: PathBuf,
    /// File name prefix of log files (default: result)
    pub log_prefix: String,
    /// Write a log file at all
    pub log_file: bool,
    /// Echo every input line to the transcript
    pub echo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_prefix: "result".into(),
            log_file: true,
            echo: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub log_dir: Option<PathBuf>,
    pub log_prefix: Option<String>,
    pub log_file: Option<bool>,
    pub echo: Option<bool>,
}

/// Get the XDG config directory for vdirs.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "vdirs").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("vdirs.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".vdirs.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            log_dir: overlay
                .log_dir
                .clone()
                .unwrap_or_else(|| self.log_dir.clone()),
            log_prefix: overlay
                .log_prefix
                .clone()
                .unwrap_or_else(|| self.log_prefix.clone()),
            log_file: overlay.log_file.unwrap_or(self.log_file),
            echo: overlay.echo.unwrap_or(self.echo),
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the log directory.
    fn expand_paths(&mut self) {
        let raw = self.log_dir.to_string_lossy().to_string();
        if let Ok(expanded) = shellexpand::full(&raw) {
            self.log_dir = PathBuf::from(expanded.as_ref());
        }
    }

    /// Load settings with layered precedence, using the XDG global config.
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), local_dir)
    }

    /// Load settings from an explicit global config file path.
    ///
    /// Missing files are skipped; unreadable or malformed ones are errors.
    pub fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply VDIRS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                // VDIRS_LOG_DIR, not VDIRS__LOG_DIR
                Environment::with_prefix("VDIRS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("log_dir") {
            settings.log_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("log_prefix") {
            settings.log_prefix = val;
        }
        if let Ok(val) = config.get_bool("log_file") {
            settings.log_file = val;
        }
        if let Ok(val) = config.get_bool("echo") {
            settings.echo = val;
        }

        Ok(settings)
    }

    /// Render as TOML, e.g. for a config template.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_logs_result_prefix() {
        let settings = Settings::default();
        assert_eq!(settings.log_dir, PathBuf::from("logs"));
        assert_eq!(settings.log_prefix, "result");
        assert!(settings.log_file);
        assert!(settings.echo);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_values() {
        let overlay = RawSettings {
            log_prefix: Some("run".into()),
            echo: Some(false),
            ..Default::default()
        };

        let merged = Settings::default().merge_with(&overlay);

        assert_eq!(merged.log_prefix, "run");
        assert!(!merged.echo);
        assert_eq!(merged.log_dir, PathBuf::from("logs"));
        assert!(merged.log_file);
    }

    #[test]
    fn given_settings_when_rendering_toml_then_round_trips_fields() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("log_prefix = \"result\""));
        assert!(toml.contains("echo = true"));
    }
}
