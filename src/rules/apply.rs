//! Applying and reversing moves on a shared board
//!
//! The search explores the tree on one mutable board. Every apply is
//! paired with an exact reverse, so the board after `reverse_move` is
//! bit-for-bit the board before `apply_move`, counter cells included.
//! [`AppliedMove`] ties the reverse to a scope.

use crate::board::{is_piece, Board, Color, EMPTY, KING, MAN};
use crate::error::{CheckersError, CheckersResult};
use crate::moves::{Move, Step};

/// Apply a move, recording captures and promotions on its steps.
///
/// Each step moves the piece, removes a jumped piece from the midpoint
/// (decrementing its color's counter) and crowns a man landing on its
/// promotion row. If a later step is refused, the steps already made are
/// undone before the error is returned.
///
/// # Arguments
/// * `board` - Board to mutate
/// * `mv` - Move to make; its step records are overwritten
///
/// # Errors
/// `IllegalStep` when a step starts on an empty square, lands off the dark
/// squares or on an occupied one, or jumps over nothing. In debug builds
/// also `CorruptBoard` if the board fails its consistency check.
pub fn apply_move(board: &mut Board, mv: &mut Move) -> CheckersResult<()> {
    if cfg!(debug_assertions) {
        board.validate()?;
    }

    let steps = mv.steps_mut();
    for i in 0..steps.len() {
        if let Err(err) = apply_step(board, &mut steps[i]) {
            for done in steps[..i].iter().rev() {
                reverse_step(board, done);
            }
            return Err(err);
        }
    }

    if cfg!(debug_assertions) {
        board.validate()?;
    }
    Ok(())
}

/// Undo a move previously made with [`apply_move`].
///
/// Steps are undone last to first: the final hop of a chain is taken back
/// before the one that led to it.
pub fn reverse_move(board: &mut Board, mv: &Move) {
    for step in mv.steps().iter().rev() {
        reverse_step(board, step);
    }
    debug_assert!(board.validate().is_ok(), "board corrupted by reverse");
}

fn apply_step(board: &mut Board, step: &mut Step) -> CheckersResult<()> {
    let (from, to) = (step.from, step.to);
    let illegal = |reason| CheckersError::IllegalStep { from, to, reason };

    let piece = board.get(step.from);
    let color = Color::of(piece).ok_or_else(|| illegal("no piece on origin"))?;
    if !step.to.is_dark() {
        return Err(illegal("destination is not a playable square"));
    }
    if board.get(step.to) != EMPTY {
        return Err(illegal("destination is occupied"));
    }
    let dx = (to.x as i32 - from.x as i32).abs();
    let dy = (to.y as i32 - from.y as i32).abs();
    if dx != dy || !(1..=2).contains(&dx) {
        return Err(illegal("not a one- or two-square diagonal"));
    }

    let captured = if step.is_jump() {
        let mid = step.from.midpoint(step.to);
        let jumped = board.get(mid);
        let Some(jumped_color) = Color::of(jumped) else {
            return Err(illegal("jump passes over no piece"));
        };
        if jumped_color == color {
            return Err(illegal("jump passes over own piece"));
        }
        board.set(mid, EMPTY);
        board.decrement_count(jumped_color);
        jumped
    } else {
        EMPTY
    };

    board.set(step.from, EMPTY);
    step.captured = captured;
    step.promoted = piece & MAN != 0 && step.to.y == color.promotion_row();
    board.set(
        step.to,
        if step.promoted {
            (piece & !MAN) | KING
        } else {
            piece
        },
    );
    Ok(())
}

fn reverse_step(board: &mut Board, step: &Step) {
    let mut piece = board.get(step.to);
    if step.promoted {
        piece = (piece & !KING) | MAN;
    }
    board.set(step.to, EMPTY);
    board.set(step.from, piece);

    if is_piece(step.captured) {
        board.set(step.from.midpoint(step.to), step.captured);
        if let Some(color) = Color::of(step.captured) {
            board.increment_count(color);
        }
    }
}

/// Scoped application of a move.
///
/// The move is applied on construction and reversed when the guard is
/// dropped, on every exit path of the scope that holds it.
///
/// ```
/// use checkers::board::{Board, Square};
/// use checkers::moves::Move;
/// use checkers::rules::AppliedMove;
///
/// let mut board = Board::new();
/// let before = board;
/// let mut mv = Move::new(Square::new(2, 2), Square::new(3, 3));
/// {
///     let applied = AppliedMove::new(&mut board, &mut mv).unwrap();
///     assert_eq!(applied.board().get(Square::new(2, 2)), 0);
/// }
/// assert_eq!(board, before);
/// ```
pub struct AppliedMove<'a> {
    board: &'a mut Board,
    mv: &'a Move,
}

impl<'a> AppliedMove<'a> {
    /// Apply `mv` to `board` for the lifetime of the guard
    pub fn new(board: &'a mut Board, mv: &'a mut Move) -> CheckersResult<Self> {
        apply_move(board, mv)?;
        Ok(Self { board, mv })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &*self.board
    }

    /// Board with the move applied. Anything applied through it must be
    /// reversed before the guard drops.
    #[inline]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut *self.board
    }

    /// The applied move, with its capture and promotion records filled in
    #[inline]
    pub fn mv(&self) -> &Move {
        self.mv
    }
}

impl Drop for AppliedMove<'_> {
    fn drop(&mut self) {
        reverse_move(&mut *self.board, self.mv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Square, BLACK_KING, BLACK_MAN, WHITE_KING, WHITE_MAN};

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y)
    }

    #[test]
    fn test_plain_step() {
        let mut board = Board::new();
        let before = board;
        let mut mv = Move::new(sq(2, 2), sq(3, 3));

        apply_move(&mut board, &mut mv).unwrap();
        assert_eq!(board.get(sq(2, 2)), EMPTY);
        assert_eq!(board.get(sq(3, 3)), BLACK_MAN);
        assert_eq!(mv.piece_captured(), EMPTY);
        assert_eq!(board.piece_count(Color::Black), 12);
        assert_eq!(board.piece_count(Color::White), 12);

        reverse_move(&mut board, &mv);
        assert_eq!(board, before);
    }

    #[test]
    fn test_jump_removes_piece_and_count() {
        let mut board = Board::empty();
        board.place(sq(2, 2), BLACK_MAN);
        board.place(sq(3, 3), WHITE_MAN);
        board.place(sq(6, 6), WHITE_MAN);
        let before = board;

        let mut mv = Move::new(sq(2, 2), sq(4, 4));
        apply_move(&mut board, &mut mv).unwrap();
        assert_eq!(board.get(sq(3, 3)), EMPTY);
        assert_eq!(board.get(sq(4, 4)), BLACK_MAN);
        assert_eq!(mv.piece_captured(), WHITE_MAN);
        assert_eq!(board.piece_count(Color::White), 1);
        assert_eq!(board.piece_count(Color::Black), 1);
        assert_eq!(board.count_pieces().total(), before.count_pieces().total() - 1);

        reverse_move(&mut board, &mv);
        assert_eq!(board, before);
    }

    #[test]
    fn test_promotion_and_demotion() {
        let mut board = Board::empty();
        board.place(sq(1, 5), WHITE_MAN);
        board.place(sq(2, 6), BLACK_MAN);
        board.place(sq(4, 4), WHITE_MAN);
        let before = board;

        let mut mv = Move::new(sq(2, 6), sq(3, 7));
        apply_move(&mut board, &mut mv).unwrap();
        assert!(mv.promoted());
        assert_eq!(board.get(sq(3, 7)), BLACK_KING);

        reverse_move(&mut board, &mv);
        assert_eq!(board.get(sq(2, 6)), BLACK_MAN);
        assert_eq!(board, before);
    }

    #[test]
    fn test_white_king_does_not_promote_again() {
        let mut board = Board::empty();
        board.place(sq(1, 1), WHITE_KING);
        board.place(sq(6, 6), BLACK_MAN);
        let mut mv = Move::new(sq(1, 1), sq(0, 0));
        apply_move(&mut board, &mut mv).unwrap();
        assert!(!mv.promoted());
        assert_eq!(board.get(sq(0, 0)), WHITE_KING);
    }

    #[test]
    fn test_multi_jump_round_trip() {
        let mut board = Board::empty();
        board.place(sq(0, 0), BLACK_MAN);
        board.place(sq(1, 1), WHITE_MAN);
        board.place(sq(3, 3), WHITE_MAN);
        board.place(sq(7, 7), WHITE_MAN);
        let before = board;

        let mut mv = Move::new(sq(0, 0), sq(2, 2));
        mv.extend_with(&Move::new(sq(2, 2), sq(4, 4)));
        apply_move(&mut board, &mut mv).unwrap();
        assert_eq!(board.get(sq(4, 4)), BLACK_MAN);
        assert_eq!(board.piece_count(Color::White), 1);
        assert_eq!(mv.steps()[1].captured, WHITE_MAN);

        reverse_move(&mut board, &mv);
        assert_eq!(board, before);
    }

    #[test]
    fn test_refused_steps() {
        let mut board = Board::new();
        let before = board;

        // Empty origin
        let mut mv = Move::new(sq(3, 3), sq(4, 4));
        assert!(matches!(
            apply_move(&mut board, &mut mv),
            Err(CheckersError::IllegalStep { .. })
        ));
        // Occupied destination
        let mut mv = Move::new(sq(1, 1), sq(2, 2));
        assert!(apply_move(&mut board, &mut mv).is_err());
        // Light square destination
        let mut mv = Move::new(sq(2, 2), sq(2, 3));
        assert!(apply_move(&mut board, &mut mv).is_err());
        // Jump over nothing
        let mut mv = Move::new(sq(2, 2), sq(4, 4));
        assert!(apply_move(&mut board, &mut mv).is_err());
        // Straight up the column
        let mut mv = Move::new(sq(2, 2), sq(2, 4));
        assert!(matches!(
            apply_move(&mut board, &mut mv),
            Err(CheckersError::IllegalStep { .. })
        ));
        // Three squares along a diagonal
        let mut mv = Move::new(sq(2, 2), sq(5, 5));
        assert!(apply_move(&mut board, &mut mv).is_err());

        assert_eq!(board, before);
    }

    #[test]
    fn test_refuses_jump_over_own_piece() {
        let mut board = Board::empty();
        board.place(sq(2, 2), BLACK_MAN);
        board.place(sq(3, 3), BLACK_MAN);
        board.place(sq(7, 7), WHITE_MAN);
        let before = board;

        let mut mv = Move::new(sq(2, 2), sq(4, 4));
        assert!(matches!(
            apply_move(&mut board, &mut mv),
            Err(CheckersError::IllegalStep { .. })
        ));
        assert_eq!(board, before);
        assert_eq!(board.piece_count(Color::Black), 2);
    }

    #[test]
    fn test_failed_chain_is_rolled_back() {
        let mut board = Board::empty();
        board.place(sq(0, 0), BLACK_MAN);
        board.place(sq(1, 1), WHITE_MAN);
        board.place(sq(5, 5), WHITE_MAN);
        let before = board;

        // Second hop jumps over an empty square
        let mut mv = Move::new(sq(0, 0), sq(2, 2));
        mv.extend_with(&Move::new(sq(2, 2), sq(4, 4)));
        assert!(apply_move(&mut board, &mut mv).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_guard_reverses_on_drop() {
        let mut board = Board::new();
        let before = board;
        let mut mv = Move::new(sq(2, 2), sq(3, 3));

        let early_exit = |board: &mut Board, mv: &mut Move| -> CheckersResult<bool> {
            let applied = AppliedMove::new(board, mv)?;
            if applied.board().get(sq(3, 3)) == BLACK_MAN {
                return Ok(true);
            }
            Ok(false)
        };
        assert!(early_exit(&mut board, &mut mv).unwrap());
        assert_eq!(board, before);
    }
}
