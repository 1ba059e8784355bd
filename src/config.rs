//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/autocli/autocli.toml`
//! 3. Local config: explicit path passed to [`Settings::load`]
//! 4. Environment variables: `AUTOCLI_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::DecorateError;

/// Settings that shape every generated binding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Parameters starting with this marker are hidden from the CLI
    pub internal_marker: String,
    /// Show option defaults in help output
    pub show_default: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            internal_marker: "_".into(),
            show_default: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub internal_marker: Option<String>,
    pub show_default: Option<bool>,
}

/// Get the XDG config directory for autocli.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "autocli").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("autocli.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, DecorateError> {
    let content = std::fs::read_to_string(path).map_err(|e| DecorateError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| DecorateError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            internal_marker: overlay
                .internal_marker
                .clone()
                .unwrap_or_else(|| self.internal_marker.clone()),
            show_default: overlay.show_default.unwrap_or(self.show_default),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional project config file; a missing file is an error
    pub fn load(local: Option<&Path>) -> Result<Self, DecorateError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = local {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply AUTOCLI_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, DecorateError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("AUTOCLI")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("internal_marker") {
            settings.internal_marker = val;
        }
        if let Ok(val) = config.get_bool("show_default") {
            settings.show_default = val;
        }
        Ok(settings)
    }

    /// An empty marker would hide every parameter.
    fn validate(&self) -> Result<(), DecorateError> {
        if self.internal_marker.is_empty() {
            return Err(DecorateError::Config {
                message: "internal_marker must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, DecorateError> {
        toml::to_string_pretty(self).map_err(|e| DecorateError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# autocli configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/autocli/autocli.toml
#   Local:  path passed by the application
#   Env:    AUTOCLI_* environment variables

# Parameters whose names start with this marker are hidden from the CLI
# internal_marker = "_"

# Show option defaults in --help
# show_default = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> DecorateError {
    DecorateError::Config {
        message: e.to_string(),
    }
}
