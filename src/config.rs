//! Configuration for menu-helper paths.
//!
//! Configuration sources (highest priority first):
//! 1. Explicit data home (`--data-home`, which clap binds to `XDG_DATA_HOME`)
//! 2. Config file (`<config dir>/menu-helper/config.yaml`)
//!
//! There is no fallback: if neither source names a data home,
//! resolution fails and no store is created.
//!
//! Paths in the config file are relative to the config file's directory.

pub mod paths;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the base data directory
pub const DATA_HOME_ENV: &str = "XDG_DATA_HOME";

/// Errors that can occur while resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot find environment variable XDG_DATA_HOME. Please define it (or set paths.data_home in the config file) before continuing.")]
    MissingDataHome,

    #[error("Failed to read config file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Base data directory (relative to the config file)
    pub data_home: Option<String>,
}

/// Where the data home came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataHomeSource {
    Environment,
    ConfigFile,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Base data directory; the store lives in `<data_home>/menu-helper`
    pub data_home: PathBuf,
    /// Which source supplied `data_home`
    pub source: DataHomeSource,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Use `data_home` directly, as if it came from the environment
    pub fn with_data_home(data_home: impl Into<PathBuf>) -> Self {
        Self {
            data_home: data_home.into(),
            source: DataHomeSource::Environment,
            config_file: None,
        }
    }

    /// `<data_home>/menu-helper`
    pub fn app_dir(&self) -> PathBuf {
        paths::app_dir(&self.data_home)
    }

    /// `<data_home>/menu-helper/recipes.db`
    pub fn database_path(&self) -> PathBuf {
        paths::database_file(&self.data_home)
    }

    /// `<data_home>/menu-helper/recipes.lock`
    pub fn lock_path(&self) -> PathBuf {
        paths::lock_file(&self.data_home)
    }
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Resolve configuration from an explicit data home and the default config file
pub fn load(data_home: Option<PathBuf>) -> Result<ResolvedConfig, ConfigError> {
    let config_file = paths::default_config_file().filter(|p| p.exists());
    resolve(data_home, config_file.as_deref())
}

/// Resolve configuration from an explicit data home and a specific config file
pub fn resolve(
    data_home: Option<PathBuf>,
    config_file: Option<&Path>,
) -> Result<ResolvedConfig, ConfigError> {
    let data_home = data_home.filter(|p| !p.as_os_str().is_empty());

    if let Some(data_home) = data_home {
        return Ok(ResolvedConfig {
            data_home,
            source: DataHomeSource::Environment,
            config_file: config_file.map(Path::to_path_buf),
        });
    }

    let Some(config_path) = config_file else {
        return Err(ConfigError::MissingDataHome);
    };

    let config = load_config_file(config_path)?;
    let base_dir = config_path.parent().unwrap_or(Path::new("."));

    let data_home = config
        .paths
        .data_home
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| resolve_path(base_dir, s))
        .ok_or(ConfigError::MissingDataHome)?;

    tracing::debug!(path = %config_path.display(), "Using data home from config file");

    Ok(ResolvedConfig {
        data_home,
        source: DataHomeSource::ConfigFile,
        config_file: Some(config_path.to_path_buf()),
    })
}
