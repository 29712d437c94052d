//! Recommendation service.
//!
//! Ties the pieces together for one invocation:
//! - Drops history titles the store does not know
//! - Builds the candidate set once (every other article)
//! - Ranks the candidates against each history article
//! - Fuses the per-article rankings into the final top-k list

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use rayon::prelude::*;

use crate::vectors::fusion::fuse;
use crate::vectors::similarity::{CandidateSet, RankedList, SimilarityRanker};
use crate::vectors::store::{StoreError, VectorStore};

/// Errors that can occur while producing recommendations.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors that can occur while writing recommendations out.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Recommends articles from a reader's history.
pub struct RecommendationService<'a> {
    store: &'a VectorStore,
}

impl<'a> RecommendationService<'a> {
    pub fn new(store: &'a VectorStore) -> Self {
        Self { store }
    }

    /// Recommend up to `k` articles for the given history.
    ///
    /// Unknown and repeated history titles are ignored. Returns an empty list
    /// when `k` is 0 or no history title is known.
    pub fn recommend(&self, history: &[String], k: usize) -> Result<Vec<String>, RecommendError> {
        if k == 0 {
            log::debug!("k is 0, nothing to recommend");
            return Ok(vec![]);
        }

        let seeds = self.known_history(history);
        if seeds.is_empty() {
            log::info!("No history article found in the index.");
            return Ok(vec![]);
        }

        let excluded: HashSet<&str> = seeds.iter().copied().collect();
        let candidates = CandidateSet::from_store_excluding(self.store, &excluded);
        if candidates.is_empty() {
            log::info!("Every indexed article is already in the history.");
            return Ok(vec![]);
        }

        log::info!(
            "Ranking {} candidates against {} history articles...",
            candidates.len(),
            seeds.len()
        );

        let ranked_lists = self.rank_all(&seeds, &candidates)?;

        log::info!("Ranked articles.");

        Ok(fuse(&ranked_lists, k))
    }

    /// History titles present in the store, first occurrence only.
    fn known_history<'h>(&self, history: &'h [String]) -> Vec<&'h str> {
        let mut seen = HashSet::new();
        let mut seeds = Vec::with_capacity(history.len());

        for title in history {
            if !self.store.contains(title) {
                log::debug!("skipping unknown history article {title:?}");
                continue;
            }
            if seen.insert(title.as_str()) {
                seeds.push(title.as_str());
            }
        }

        seeds
    }

    /// One ranking per seed, in seed order.
    fn rank_all(
        &self,
        seeds: &[&str],
        candidates: &CandidateSet,
    ) -> Result<Vec<RankedList>, StoreError> {
        let ranker = SimilarityRanker::new(self.store);
        let _span = tracing::debug_span!("rank_all", seeds = seeds.len()).entered();

        seeds
            .par_iter()
            .map(|seed| ranker.rank(seed, candidates))
            .collect()
    }
}

/// Write recommendations as JSON to `destination`, or to stdout when `None`.
pub fn emit_output(
    recommendations: &[String],
    destination: Option<&Path>,
) -> Result<(), OutputError> {
    match destination {
        Some(path) => {
            log::info!("Saving ranked articles to {}...", path.display());
            save_json(recommendations, path)?;
            log::info!("Saved ranked articles.");
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_json(recommendations, &mut handle)?;
            writeln!(handle)?;
        }
    }

    Ok(())
}

fn write_json<W: Write>(recommendations: &[String], writer: W) -> Result<(), OutputError> {
    serde_json::to_writer(writer, recommendations)?;
    Ok(())
}

/// Write to a temp file next to `path`, then rename over it.
fn save_json(recommendations: &[String], path: &Path) -> Result<(), OutputError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    write_json(recommendations, temp.as_file_mut())?;
    temp.as_file_mut().flush()?;
    temp.persist(path).map_err(std::io::Error::from)?;

    Ok(())
}
