//! Reading history loaded from a JSON array of article titles.

use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("failed to read history file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("history file {path} is not a JSON array of titles: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Titles the reader has already seen, in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    titles: Vec<String>,
}

impl History {
    /// Load a history file (a JSON array of strings).
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        let contents = std::fs::read_to_string(path).map_err(|source| HistoryError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let titles: Vec<String> =
            serde_json::from_str(&contents).map_err(|source| HistoryError::Json {
                path: path.display().to_string(),
                source,
            })?;

        Ok(Self { titles })
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}
