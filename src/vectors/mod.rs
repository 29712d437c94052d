//! Article recommendation from term-weight vectors.
//!
//! Ranks every unread article against each article in a reader's history and
//! merges the rankings with Reciprocal Rank Fusion.
//!
//! # Architecture
//!
//! - `store`: In-memory title -> vector table with a shared vocabulary
//! - `storage`: CSV file I/O for index.csv persistence
//! - `similarity`: Cosine similarity ranking against one seed article
//! - `fusion`: Reciprocal Rank Fusion of several rankings
//! - `history`: JSON history file loading
//! - `service`: High-level recommendation service and output

pub mod fusion;
pub mod history;
pub mod service;
pub mod similarity;
pub mod storage;
pub mod store;

pub use history::History;
pub use service::{emit_output, RecommendationService};
pub use storage::IndexStorage;

/// Number of recommendations returned when none is requested.
pub const DEFAULT_K: usize = 10;
