//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/medus/medus.toml`
//! 3. Local config: `<dir>/.medus.toml`
//! 4. Environment variables: `MEDUS_*` prefix
//!
//! CLI flags are applied on top by the command layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::SelectionMode;

/// Unified configuration for medus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Catalog file (TOML or JSON); built-in catalog when unset
    pub catalog: Option<PathBuf>,
    /// Selection bookkeeping mode
    pub mode: SelectionMode,
    /// Use plain ASCII glyphs when drawing the form
    pub ascii: bool,
    /// Prompt shown by the interactive picker
    pub prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: None,
            mode: SelectionMode::default(),
            ascii: false,
            prompt: "medus> ".to_string(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog: Option<PathBuf>,
    pub mode: Option<SelectionMode>,
    pub ascii: Option<bool>,
    pub prompt: Option<String>,
}

/// Get the XDG config directory for medus.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "medus").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("medus.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".medus.toml")
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

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input as is.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog: overlay.catalog.clone().or_else(|| self.catalog.clone()),
            mode: overlay.mode.unwrap_or(self.mode),
            ascii: overlay.ascii.unwrap_or(self.ascii),
            prompt: overlay
                .prompt
                .clone()
                .unwrap_or_else(|| self.prompt.clone()),
        }
    }

    /// Expand shell variables and tilde in the catalog path.
    fn expand_paths(&mut self) {
        if let Some(catalog) = &self.catalog {
            let expanded = expand_env_vars(catalog.to_string_lossy().as_ref());
            self.catalog = Some(PathBuf::from(expanded));
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.medus.toml`
    ///
    /// A relative `catalog` in the local file is resolved against `local_dir`.
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let mut raw = load_raw_settings(&local_path)?;
                raw.catalog = raw.catalog.map(|p| {
                    let expanded = PathBuf::from(expand_env_vars(&p.to_string_lossy()));
                    if expanded.is_relative() {
                        dir.join(expanded)
                    } else {
                        expanded
                    }
                });
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply MEDUS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("MEDUS").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog") {
            settings.catalog = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("mode") {
            settings.mode = parse_mode(&val)?;
        }
        if let Ok(val) = config.get_bool("ascii") {
            settings.ascii = val;
        }
        if let Ok(val) = config.get_string("prompt") {
            settings.prompt = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# medus configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/medus/medus.toml
#   Local:  ./.medus.toml (or the directory given with -C)
#   Env:    MEDUS_* environment variables
#   Flags:  --catalog, --mode

# Catalog file (.toml or .json); the built-in catalog is used when unset
# catalog = "~/catalogs/medus.toml"

# Selection bookkeeping: "explicit" (keyed, cascading) or "legacy"
# mode = "explicit"

# Draw the form with plain ASCII glyphs
# ascii = false

# Prompt for `medus session`
# prompt = "medus> "
"#
        .to_string()
    }
}

fn parse_mode(val: &str) -> Result<SelectionMode, ApplicationError> {
    match val.trim().to_ascii_lowercase().as_str() {
        "explicit" => Ok(SelectionMode::Explicit),
        "legacy" => Ok(SelectionMode::Legacy),
        other => Err(ApplicationError::Config {
            message: format!("invalid mode '{other}' (expected explicit or legacy)"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
