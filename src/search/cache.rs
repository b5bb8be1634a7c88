//! Leaf-score cache keyed by a short board hash
//!
//! The short hash packs the occupancy of the eight central dark squares
//! into 16 bits, so unrelated boards often share a bucket. A hit is only
//! returned after the stored board compares equal to the probe, which
//! makes the cache an exact-match table despite the lossy key.
//!
//! # Example
//!
//! ```
//! use checkers::board::Board;
//! use checkers::search::BoardCache;
//!
//! let mut cache = BoardCache::new();
//! let board = Board::new();
//!
//! cache.insert(&board, 0.25);
//! assert_eq!(cache.lookup(&board), Some(0.25));
//! ```

use crate::board::{Board, Square, BLACK, WHITE};
use crate::eval::Score;

/// Number of hash buckets (one per 16-bit key)
pub const BUCKET_COUNT: usize = 1 << 16;

/// Entries a bucket may hold before inserts are dropped
pub const BUCKET_CAPACITY: usize = 10_000;

/// 16-bit occupancy hash of the central dark squares, two bits per square
#[inline]
pub fn short_hash(board: &Board) -> u16 {
    let mut hash: u16 = 0;
    for y in 2..6u8 {
        for x in ((y % 2 + 2)..6).step_by(2) {
            let cell = board.get(Square::new(x, y));
            hash = (hash << 2) | (((cell & WHITE != 0) as u16) << 1) | (cell & BLACK != 0) as u16;
        }
    }
    hash
}

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    /// Inserts dropped because the bucket was full
    pub rejected: u64,
}

impl CacheStats {
    /// Hit rate in percent
    pub fn hit_rate(&self) -> f64 {
        let probes = self.hits + self.misses;
        if probes == 0 {
            0.0
        } else {
            self.hits as f64 / probes as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone)]
struct CachedBoard {
    board: Board,
    score: Score,
}

/// Bucketed exact-match cache of leaf scores.
///
/// Entries are never evicted one by one; the whole cache is cleared when
/// the evaluator it serves changes.
#[derive(Debug, Clone)]
pub struct BoardCache {
    buckets: Vec<Vec<CachedBoard>>,
    len: usize,
    stats: CacheStats,
}

impl BoardCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: vec![Vec::new(); BUCKET_COUNT],
            len: 0,
            stats: CacheStats::default(),
        }
    }

    /// Score stored for a board equal to `board`, if any
    pub fn lookup(&mut self, board: &Board) -> Option<Score> {
        let found = self.buckets[short_hash(board) as usize]
            .iter()
            .find(|entry| entry.board == *board)
            .map(|entry| entry.score);
        if found.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        found
    }

    /// Store a score, unless the board's bucket is already full.
    ///
    /// Returns whether the entry was stored.
    pub fn insert(&mut self, board: &Board, score: Score) -> bool {
        let hash = short_hash(board);
        let bucket = &mut self.buckets[hash as usize];
        if bucket.len() >= BUCKET_CAPACITY {
            self.stats.rejected += 1;
            log::trace!("cache bucket {:#06x} full, dropping entry", hash);
            return false;
        }
        bucket.push(CachedBoard {
            board: *board,
            score,
        });
        self.len += 1;
        self.stats.inserts += 1;
        true
    }

    /// Drop every entry and reset the counters
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
        self.stats = CacheStats::default();
    }

    /// Number of cached boards
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for BoardCache {
    fn default() -> Self {
        Self::new()
    }
}
