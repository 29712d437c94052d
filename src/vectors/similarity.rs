//! Cosine similarity ranking of candidate articles against a seed article.

use std::collections::HashSet;

use crate::vectors::store::{StoreError, VectorStore};

/// Titles ordered from most to least similar (rank 0 first).
pub type RankedList = Vec<String>;

/// Pool of articles eligible for recommendation.
///
/// Titles are kept sorted so that similarity ties always resolve the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    titles: Vec<String>,
}

impl CandidateSet {
    /// Build a candidate set from arbitrary titles (sorted, duplicates removed).
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut titles: Vec<String> = titles.into_iter().map(Into::into).collect();
        titles.sort();
        titles.dedup();
        Self { titles }
    }

    /// Every article in the store except the excluded titles.
    pub fn from_store_excluding(store: &VectorStore, excluded: &HashSet<&str>) -> Self {
        Self::new(store.all_titles().filter(|title| !excluded.contains(title)))
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.titles.iter().map(String::as_str)
    }
}

/// A candidate with its similarity to the seed.
#[derive(Debug, Clone)]
pub struct SimilarityResult {
    pub title: String,
    /// Cosine similarity in [-1.0, 1.0]; 0.0 when either vector is all zeros
    pub score: f64,
}

/// Ranks candidates by similarity to a seed article.
pub struct SimilarityRanker<'a> {
    store: &'a VectorStore,
}

impl<'a> SimilarityRanker<'a> {
    pub fn new(store: &'a VectorStore) -> Self {
        Self { store }
    }

    /// Order `candidates` by descending similarity to `seed`.
    ///
    /// The result is a permutation of `candidates`. The seed itself, when it
    /// is a candidate, always comes first. Equal similarities keep the
    /// candidate set order.
    pub fn rank(&self, seed: &str, candidates: &CandidateSet) -> Result<RankedList, StoreError> {
        Ok(self
            .rank_with_scores(seed, candidates)?
            .into_iter()
            .map(|result| result.title)
            .collect())
    }

    /// Same as [`rank`](Self::rank) but keeps the similarity scores.
    pub fn rank_with_scores(
        &self,
        seed: &str,
        candidates: &CandidateSet,
    ) -> Result<Vec<SimilarityResult>, StoreError> {
        let seed_vector = self.store.lookup(seed)?;
        let seed_norm = l2_norm(seed_vector);

        let mut results = candidates
            .iter()
            .map(|title| {
                let vector = self.store.lookup(title)?;
                Ok(SimilarityResult {
                    title: title.to_string(),
                    score: cosine_similarity(seed_vector, vector, seed_norm),
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        // sort_by is stable
        results.sort_by(|a, b| {
            (b.title == seed).cmp(&(a.title == seed)).then_with(|| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });

        Ok(results)
    }
}

/// Compute L2 norm of a vector.
fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine similarity with a precomputed norm for `query`.
fn cosine_similarity(query: &[f64], target: &[f64], query_norm: f64) -> f64 {
    let target_norm = l2_norm(target);
    if query_norm < f64::EPSILON || target_norm < f64::EPSILON {
        return 0.0;
    }

    let dot_product: f64 = query.iter().zip(target.iter()).map(|(a, b)| a * b).sum();
    dot_product / (query_norm * target_norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> VectorStore {
        VectorStore::from_rows(
            vec!["metal".to_string(), "storm".to_string(), "light".to_string()],
            vec![
                ("Vin".to_string(), vec![1.0, 0.0, 0.0]),
                ("Elend".to_string(), vec![0.9, 0.1, 0.0]),
                ("Kaladin".to_string(), vec![0.0, 1.0, 0.2]),
                ("Syl".to_string(), vec![0.0, 0.8, 0.6]),
                ("Stub".to_string(), vec![0.0, 0.0, 0.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_cosine_similarity() {
        let a = [1.0, 0.0];
        let b = [0.0, 1.0];
        let c = [2.0, 0.0];

        assert!((cosine_similarity(&a, &c, l2_norm(&a)) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&a, &b, l2_norm(&a)).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_norm() {
        let zero = [0.0, 0.0];
        let a = [1.0, 1.0];

        assert_eq!(cosine_similarity(&zero, &a, l2_norm(&zero)), 0.0);
        assert_eq!(cosine_similarity(&a, &zero, l2_norm(&a)), 0.0);
    }

    #[test]
    fn test_rank_orders_by_similarity() {
        let store = test_store();
        let ranker = SimilarityRanker::new(&store);
        let candidates = CandidateSet::new(["Elend", "Kaladin", "Syl"]);

        let ranked = ranker.rank("Vin", &candidates).unwrap();
        assert_eq!(ranked[0], "Elend");

        let ranked = ranker.rank("Kaladin", &candidates).unwrap();
        assert_eq!(ranked, vec!["Kaladin", "Syl", "Elend"]);
    }

    #[test]
    fn test_rank_is_permutation() {
        let store = test_store();
        let ranker = SimilarityRanker::new(&store);
        let candidates = CandidateSet::new(store.all_titles());

        let mut ranked = ranker.rank("Syl", &candidates).unwrap();
        assert_eq!(ranked.len(), candidates.len());

        ranked.sort();
        assert_eq!(ranked, candidates.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_seed_in_candidates_ranks_first() {
        let store = test_store();
        let ranker = SimilarityRanker::new(&store);
        let candidates = CandidateSet::new(store.all_titles());

        for seed in ["Vin", "Elend", "Kaladin", "Syl"] {
            let ranked = ranker.rank(seed, &candidates).unwrap();
            assert_eq!(ranked[0], seed);
        }
    }

    #[test]
    fn test_seed_wins_same_direction_tie() {
        let store = VectorStore::from_rows(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![
                ("Zane".to_string(), vec![1.0, 0.0, 0.0]),
                ("Alpha".to_string(), vec![2.0, 0.0, 0.0]),
                ("Wax".to_string(), vec![0.3, 0.7, 0.1]),
                ("Allomancer".to_string(), vec![0.9, 2.1, 0.3]),
            ],
        )
        .unwrap();
        let ranker = SimilarityRanker::new(&store);

        let ranked = ranker
            .rank("Zane", &CandidateSet::new(["Alpha", "Zane"]))
            .unwrap();
        assert_eq!(ranked, vec!["Zane", "Alpha"]);

        // parallel vectors may score a hair above the seed's own similarity
        let ranked = ranker
            .rank("Wax", &CandidateSet::new(["Allomancer", "Wax"]))
            .unwrap();
        assert_eq!(ranked, vec!["Wax", "Allomancer"]);
    }

    #[test]
    fn test_seed_first_with_zero_vector() {
        let store = test_store();
        let ranker = SimilarityRanker::new(&store);

        let candidates = CandidateSet::new(["Elend", "Stub", "Vin"]);
        let ranked = ranker.rank("Stub", &candidates).unwrap();

        assert_eq!(ranked, vec!["Stub", "Elend", "Vin"]);
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let store = test_store();
        let ranker = SimilarityRanker::new(&store);

        // every candidate scores 0.0 against the zero vector
        let candidates = CandidateSet::new(["Syl", "Elend", "Vin", "Kaladin"]);
        let ranked = ranker.rank("Stub", &candidates).unwrap();

        assert_eq!(ranked, vec!["Elend", "Kaladin", "Syl", "Vin"]);
    }

    #[test]
    fn test_rank_empty_candidates() {
        let store = test_store();
        let ranker = SimilarityRanker::new(&store);

        let ranked = ranker.rank("Vin", &CandidateSet::default()).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_unknown_seed() {
        let store = test_store();
        let ranker = SimilarityRanker::new(&store);
        let candidates = CandidateSet::new(["Vin"]);

        let result = ranker.rank("Hoid", &candidates);
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_rank_with_scores() {
        let store = test_store();
        let ranker = SimilarityRanker::new(&store);
        let candidates = CandidateSet::new(["Vin", "Kaladin"]);

        let results = ranker.rank_with_scores("Vin", &candidates).unwrap();
        assert_eq!(results[0].title, "Vin");
        assert!((results[0].score - 1.0).abs() < 1e-6);
        assert!(results[1].score.abs() < 1e-6);
    }

    #[test]
    fn test_candidate_set_excludes() {
        let store = test_store();
        let excluded: HashSet<&str> = ["Vin", "Syl"].into_iter().collect();

        let candidates = CandidateSet::from_store_excluding(&store, &excluded);
        assert_eq!(
            candidates.iter().collect::<Vec<_>>(),
            vec!["Elend", "Kaladin", "Stub"]
        );
    }
}
