//! Checkers game-tree search and self-play engine
//!
//! An 8x8 American checkers engine built to score candidate evaluators
//! (hand-written heuristics or evolved networks) by playing them against
//! each other:
//! - Mandatory captures with multi-jump chains
//! - Men promote on the far row and the chain stops there
//! - Make/unmake on a single board, no position copies during search
//! - Alpha-beta with forced-jump extension and a leaf-score cache
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation, cell codes and piece counters
//! - [`moves`]: Move and step records, PDN notation
//! - [`rules`]: Move generation, apply/reverse and winner detection
//! - [`eval`]: Leaf evaluators (heuristic, material, network substrate)
//! - [`search`]: Alpha-beta searcher and board cache
//! - [`config`]: TOML experiment configuration
//! - [`engine`]: Self-play driver and multi-threaded game runner
//!
//! # Quick Start
//!
//! ```
//! use checkers::{Board, Color, HeuristicEvaluator, Searcher};
//! use checkers::rules::apply_move;
//!
//! let mut board = Board::new();
//! let mut searcher = Searcher::new(Box::new(HeuristicEvaluator::default()));
//!
//! let result = searcher.search(&mut board, Color::Black, 4, None).unwrap();
//! if let Some(mut mv) = result.best_move {
//!     apply_move(&mut board, &mut mv).unwrap();
//!     println!("Black plays {}", mv.to_pdn());
//! }
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod moves;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Color, PieceCounts, Square, BOARD_SIZE};
pub use config::ExperimentConfig;
pub use engine::{run_games, Experiment, GameOutcome, GameRecord, GameStats};
pub use error::{CheckersError, CheckersResult};
pub use eval::{HeuristicEvaluator, LeafEvaluator, MaterialEvaluator, Score};
pub use moves::{GameLog, Move, Step};
pub use search::{SearchResult, Searcher};
