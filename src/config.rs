//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treegen/treegen.toml`
//! 3. Explicit config file (`--config` / `TREEGEN_CONFIG`), TOML or INI
//! 4. Environment variables: `TREEGEN_*` prefix
//! 5. Command line flags (applied by the CLI through [`Settings::merge_with`])

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult, TreeParams};

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
///
/// Accepts both `node_count` and the `NodeCount` spelling of `tree.ini` files.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RawSettings {
    #[serde(alias = "NodeCount", alias = "nodecount")]
    pub node_count: Option<i64>,
    #[serde(alias = "MinDepth", alias = "mindepth")]
    pub min_depth: Option<i64>,
    #[serde(alias = "MinWidth", alias = "minwidth")]
    pub min_width: Option<i64>,
    #[serde(alias = "Seed")]
    pub seed: Option<u64>,
}

/// Unified configuration for treegen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Requested number of nodes (not validated)
    pub node_count: i64,
    /// Length of the guaranteed deep branch (negative counts as 0)
    pub min_depth: i64,
    /// Fan-out of the guaranteed wide branch (negative counts as 0)
    pub min_width: i64,
    /// RNG seed, random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            node_count: 10,
            min_depth: 0,
            min_width: 0,
            seed: None,
        }
    }
}

/// Get the XDG config directory for treegen.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treegen").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treegen.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Load the global TOML file into RawSettings.
fn load_raw_toml(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Format of an explicit config file, inferred from its extension.
///
/// Anything that is not TOML, JSON or YAML is read as INI, which also covers
/// `key=value` property files.
fn file_format(path: &Path) -> FileFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => FileFormat::Toml,
        Some("json") => FileFormat::Json,
        Some("yaml") | Some("yml") => FileFormat::Yaml,
        _ => FileFormat::Ini,
    }
}

/// Load an explicit config file into RawSettings.
pub fn load_raw_file(path: &Path) -> ApplicationResult<RawSettings> {
    if !path.is_file() {
        return Err(ApplicationError::Config {
            message: format!("config file not found: {}", path.display()),
        });
    }
    let name = path.to_string_lossy();
    let config = Config::builder()
        .add_source(File::new(name.as_ref(), file_format(path)))
        .build()
        .map_err(|e| ApplicationError::Config {
            message: format!("parse {}: {}", path.display(), e),
        })?;
    config
        .try_deserialize()
        .map_err(|e| ApplicationError::Config {
            message: format!("parse {}: {}", path.display(), e),
        })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file, must exist when given
    pub fn load(config_file: Option<&Path>) -> ApplicationResult<Self> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_toml(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let raw = load_raw_file(&expand_path(path))?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            node_count: overlay.node_count.unwrap_or(self.node_count),
            min_depth: overlay.min_depth.unwrap_or(self.min_depth),
            min_width: overlay.min_width.unwrap_or(self.min_width),
            seed: overlay.seed.or(self.seed),
        }
    }

    /// Apply TREEGEN_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TREEGEN"))
            .build()
            .map_err(config_err)?;

        let raw = RawSettings {
            node_count: env_value(&config, "node_count")?,
            min_depth: env_value(&config, "min_depth")?,
            min_width: env_value(&config, "min_width")?,
            seed: env_value(&config, "seed")?,
        };
        settings = settings.merge_with(&raw);
        Ok(settings)
    }

    /// Generation parameters described by these settings.
    pub fn params(&self) -> TreeParams {
        TreeParams::new(self.node_count, self.min_depth, self.min_width)
    }

    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

/// Reads one key, treating an absent key as unset and a malformed value as an error.
fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> ApplicationResult<Option<T>> {
    match config.get::<T>(key) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}
