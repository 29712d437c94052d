//! Multi-query rank fusion.
//!
//! Merges one ranked list per history article into a single ranking with
//! Reciprocal Rank Fusion (RRF). Every list carries the same weight 1/N, and
//! a title at 0-based rank r in a list contributes:
//!
//!   1 / ((r + 1) * weight) = N / (r + 1)
//!
//! Titles missing from a list contribute nothing for it. Ties are broken by
//! the order in which titles were first seen, scanning lists in order and
//! each list from rank 0.

use std::collections::HashMap;

use crate::vectors::similarity::RankedList;

/// Result of fusing several rankings.
#[derive(Debug, Clone)]
pub struct FusedResult {
    pub title: String,
    /// Accumulated RRF score
    pub score: f64,
    /// 0-based rank in each input list (None if absent from that list)
    pub ranks: Vec<Option<usize>>,
}

/// Fuse `lists` and keep the best `k` titles.
///
/// Returns every scored title, without padding, when `k` exceeds their count.
pub fn fuse(lists: &[RankedList], k: usize) -> Vec<String> {
    let mut results = fuse_scored(lists);
    results.truncate(k);

    for result in &results {
        log::debug!(
            "title={:?} score={:.4} ranks={:?}",
            result.title,
            result.score,
            result.ranks
        );
    }

    results.into_iter().map(|result| result.title).collect()
}

/// Fuse `lists` into a full ranking with scores, best first.
pub fn fuse_scored(lists: &[RankedList]) -> Vec<FusedResult> {
    if lists.is_empty() {
        return vec![];
    }

    let list_count = lists.len();

    // first-seen order is the tie-break, so accumulate into a Vec and keep
    // a title -> position map on the side
    let mut results: Vec<FusedResult> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (list_idx, list) in lists.iter().enumerate() {
        for (rank, title) in list.iter().enumerate() {
            let contribution = list_count as f64 / (rank + 1) as f64;

            let position = *positions.entry(title.as_str()).or_insert_with(|| {
                results.push(FusedResult {
                    title: title.clone(),
                    score: 0.0,
                    ranks: vec![None; list_count],
                });
                results.len() - 1
            });

            let result = &mut results[position];
            result.score += contribution;
            // a title repeated within one list keeps its best rank
            result.ranks[list_idx].get_or_insert(rank);
        }
    }

    // sort_by is stable, equal scores stay in first-seen order
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    results
}
