//! Leaf evaluation for checkers positions
//!
//! The search never looks inside an evaluator. It calls a
//! [`LeafEvaluator`] on the boards at its depth cutoff, with scores read
//! from black's point of view:
//! - Positive values favor black
//! - Negative values favor white
//! - Magnitudes stay far below [`WIN_SCORE`], which marks a decided game

pub mod heuristic;
pub mod network;

use crate::board::{Board, Color};
use crate::error::CheckersResult;

pub use heuristic::{evaluate, Bias, HeuristicEvaluator};
pub use network::{encode_board, round_output, LinearNetwork, Network, NetworkEvaluator};

/// Evaluation scalar
pub type Score = f32;

/// Score of a position black has won
pub const WIN_SCORE: Score = (i32::MAX / 2) as Score;
/// Score of a position black has lost
pub const LOSS_SCORE: Score = -WIN_SCORE;

/// Scores boards at the search horizon.
pub trait LeafEvaluator: Send {
    /// Score `board`, positive favoring black
    fn evaluate(&mut self, board: &Board) -> CheckersResult<Score>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Material balance: black pieces minus white pieces, kings count as one
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl LeafEvaluator for MaterialEvaluator {
    fn evaluate(&mut self, board: &Board) -> CheckersResult<Score> {
        Ok(board.piece_count(Color::Black) as Score - board.piece_count(Color::White) as Score)
    }

    fn name(&self) -> &str {
        "material"
    }
}

/// Adapter turning a closure into a [`LeafEvaluator`]
pub struct FnEvaluator<F>(pub F);

impl<F> LeafEvaluator for FnEvaluator<F>
where
    F: FnMut(&Board) -> Score + Send,
{
    fn evaluate(&mut self, board: &Board) -> CheckersResult<Score> {
        Ok((self.0)(board))
    }

    fn name(&self) -> &str {
        "fn"
    }
}
