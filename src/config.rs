use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::vectors::DEFAULT_K;

/// Default location of the vector index built upstream.
const DEFAULT_INDEX_PATH: &str = "data/index.csv";
/// Config file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "recommender.yaml";
/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "RECOMMENDER_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("config file {path} is malformed: {source}")]
    Malformed {
        path: String,
        source: serde_yml::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Path to the CSV vector index
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// Number of recommendations when `-k` is not given
    #[serde(default = "default_k")]
    pub default_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            default_k: DEFAULT_K,
        }
    }
}

fn default_index_path() -> PathBuf {
    PathBuf::from(DEFAULT_INDEX_PATH)
}

fn default_k() -> usize {
    DEFAULT_K
}

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.index_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("index_path must not be empty".to_string()));
        }

        Ok(())
    }

    /// Resolve and load the configuration.
    ///
    /// Lookup order: `explicit` path, `$RECOMMENDER_CONFIG`, `./recommender.yaml`.
    /// When none is given and the default file does not exist, defaults are used.
    /// Missing files are never created.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_with(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Self::load_with(Path::new(&path));
            }
        }

        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            return Self::load_with(path);
        }

        log::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_with(path: &Path) -> Result<Self, ConfigError> {
        let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::parse(&config_str, &path.display().to_string())?;

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(config_str: &str, path: &str) -> Result<Self, ConfigError> {
        // an empty file is a valid, all-defaults config
        if config_str.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self =
            serde_yml::from_str(config_str).map_err(|source| ConfigError::Malformed {
                path: path.to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }
}
