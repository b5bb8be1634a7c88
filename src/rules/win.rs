//! Game-end detection
//!
//! A side with no pieces left has lost. When the side to move is known, a
//! side that still has pieces but no legal move has lost as well.

use crate::board::{Board, Color};

use super::movegen::has_any_move;

/// Winner by piece count alone, read from the counter cells
#[inline]
pub fn winner(board: &Board) -> Option<Color> {
    if board.piece_count(Color::White) == 0 {
        Some(Color::Black)
    } else if board.piece_count(Color::Black) == 0 {
        Some(Color::White)
    } else {
        None
    }
}

/// Winner with `to_move` about to play: being unable to move loses
pub fn winner_to_move(board: &Board, to_move: Color) -> Option<Color> {
    winner(board).or_else(|| {
        if has_any_move(board, to_move) {
            None
        } else {
            Some(to_move.opponent())
        }
    })
}
