//! Checkers rules
//!
//! This module implements the rule set for 8x8 checkers:
//! - Move generation with forced captures and multi-jump chains
//! - Exact apply/reverse of moves on a shared board
//! - Win detection (elimination, no legal move)

pub mod apply;
pub mod movegen;
pub mod win;

// Re-exports for convenient access
pub use apply::{apply_move, reverse_move, AppliedMove};
pub use movegen::{generate_moves, generate_moves_into, has_any_move, GeneratedMoves, MAX_MOVES};
pub use win::{winner, winner_to_move};
