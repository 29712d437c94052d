//! CSV storage for the article vector index.
//!
//! File format: index.csv
//!
//! Header row:
//! - key column name (conventionally `title`)
//! - one column per vocabulary term, in vector order
//!
//! Rows (repeated):
//! - article title
//! - one weight per vocabulary term

use std::path::PathBuf;
use std::time::Instant;

use crate::vectors::store::{StoreError, VectorStore};

/// Errors that can occur during index storage operations.
#[derive(Debug, thiserror::Error)]
pub enum VectorStorageError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Invalid weight {value:?} for {title:?} in column {column}")]
    InvalidWeight {
        title: String,
        column: String,
        value: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Storage manager for the vector index file.
pub struct IndexStorage {
    path: PathBuf,
}

impl IndexStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the vector store from the index file.
    #[tracing::instrument(skip_all, fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<VectorStore, VectorStorageError> {
        let now = Instant::now();
        let mut reader = csv::Reader::from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(VectorStorageError::InvalidFormat(
                "missing header row".to_string(),
            ));
        }

        // first column is the title key, the rest is the vocabulary
        let vocabulary: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
        let mut store = VectorStore::new(vocabulary);

        for record in reader.records() {
            let record = record?;
            let title = record
                .get(0)
                .ok_or_else(|| VectorStorageError::InvalidFormat("empty row".to_string()))?
                .to_string();

            let mut vector = Vec::with_capacity(store.dimensions());
            for (column, value) in record.iter().enumerate().skip(1) {
                let weight = value.trim().parse::<f64>().map_err(|_| {
                    VectorStorageError::InvalidWeight {
                        title: title.clone(),
                        column: headers.get(column).unwrap_or_default().to_string(),
                        value: value.to_string(),
                    }
                })?;
                vector.push(weight);
            }

            store.insert(title, vector)?;
        }

        log::debug!(
            "took {}ms to read index ({} articles, {} terms)",
            now.elapsed().as_micros() as f64 / 1000.0,
            store.len(),
            store.dimensions()
        );

        Ok(store)
    }
}
