//! Search module for the checkers engine
//!
//! Contains:
//! - Alpha-beta search with forced-jump extension and iterative deepening
//! - Leaf-score cache keyed by a short board hash

pub mod alphabeta;
pub mod cache;

pub use alphabeta::{Evaluation, SearchResult, SearchStats, Searcher};
pub use cache::{short_hash, BoardCache, CacheStats};
