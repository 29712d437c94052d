//! In-memory article vector table.
//!
//! Maps article titles to fixed-length term-weight vectors that share one
//! ordered vocabulary. Built once from the persisted index, read-only after.

use std::collections::HashMap;

/// Errors raised while building or querying a [`VectorStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("article not found: {0:?}")]
    NotFound(String),

    #[error("Dimension mismatch for {title:?}: expected {expected}, got {got}")]
    DimensionMismatch {
        title: String,
        expected: usize,
        got: usize,
    },

    #[error("duplicate article title: {0:?}")]
    DuplicateTitle(String),

    #[error("non-finite weight for {title:?} in column {column}")]
    NonFiniteValue { title: String, column: usize },
}

/// Title -> vector table with a shared feature vocabulary.
#[derive(Debug, Clone, Default)]
pub struct VectorStore {
    /// Term for each vector dimension, in column order
    vocabulary: Vec<String>,
    /// Titles in insertion (file) order
    titles: Vec<String>,
    /// Title -> row in `vectors`
    rows: HashMap<String, usize>,
    vectors: Vec<Vec<f64>>,
}

impl VectorStore {
    /// Create an empty store for the given vocabulary.
    pub fn new(vocabulary: Vec<String>) -> Self {
        Self {
            vocabulary,
            ..Default::default()
        }
    }

    /// Build a store from `(title, vector)` rows.
    #[cfg(test)]
    pub fn from_rows<I>(vocabulary: Vec<String>, rows: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        let mut store = Self::new(vocabulary);
        for (title, vector) in rows {
            store.insert(title, vector)?;
        }
        Ok(store)
    }

    /// Add an article while the store is being built.
    pub(super) fn insert(&mut self, title: String, vector: Vec<f64>) -> Result<(), StoreError> {
        if vector.len() != self.dimensions() {
            return Err(StoreError::DimensionMismatch {
                title,
                expected: self.dimensions(),
                got: vector.len(),
            });
        }

        if let Some(column) = vector.iter().position(|v| !v.is_finite()) {
            return Err(StoreError::NonFiniteValue { title, column });
        }

        if self.rows.contains_key(&title) {
            return Err(StoreError::DuplicateTitle(title));
        }

        self.rows.insert(title.clone(), self.vectors.len());
        self.titles.push(title);
        self.vectors.push(vector);

        Ok(())
    }

    /// Vector of the given article.
    pub fn lookup(&self, title: &str) -> Result<&[f64], StoreError> {
        self.rows
            .get(title)
            .map(|&row| self.vectors[row].as_slice())
            .ok_or_else(|| StoreError::NotFound(title.to_string()))
    }

    pub fn contains(&self, title: &str) -> bool {
        self.rows.contains_key(title)
    }

    /// All article titles, in the order they were loaded.
    pub fn all_titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.titles.iter().map(String::as_str)
    }

    /// Vector dimensionality (vocabulary size).
    pub fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
