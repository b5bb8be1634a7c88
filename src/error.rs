//! Error types for the checkers engine
//!
//! Only invariant violations and configuration problems are errors.
//! Game-terminal states (no legal move, a side out of pieces) are reported
//! through `Option` moves and the win/loss score sentinels instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::board::{Cell, Square};

/// Errors that can occur in the checkers engine
#[derive(Error, Debug)]
pub enum CheckersError {
    /// Consistency check found a piece off the playable squares, or a cell
    /// code that cannot occur
    #[error("Corrupt board: square {square} holds cell code {code}")]
    CorruptBoard { square: Square, code: Cell },

    /// Move generation exceeded its safety cap
    #[error("Move list overflow: more than {limit} moves generated")]
    MoveListOverflow { limit: usize },

    /// A jump chain was continued from a square without a moving piece
    #[error("Tried to continue a jump from {square} but there is no piece there")]
    NoPieceToJump { square: Square },

    /// The applier refused a step
    #[error("Illegal step {from} -> {to}: {reason}")]
    IllegalStep {
        from: Square,
        to: Square,
        reason: &'static str,
    },

    /// A leaf evaluator could not score the board
    #[error("Leaf evaluation failed: {0}")]
    Evaluator(String),

    /// Configuration file could not be read
    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Win/loss/tie tally text did not have three counts
    #[error("Invalid game stats {0:?}: expected \"wins losses ties\"")]
    InvalidStats(String),

    /// A configuration value is out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias for checkers engine operations
pub type CheckersResult<T> = Result<T, CheckersError>;
