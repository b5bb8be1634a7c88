//! Move representation and PDN transcripts
//!
//! A [`Move`] is one turn: a single step, or a chain of jumps made by the
//! same piece. Each [`Step`] records what it captured and whether it
//! crowned the piece, so the move can be reversed exactly.

use std::fmt;

use smallvec::SmallVec;

use crate::board::{Cell, Square, EMPTY};

/// Longest possible jump chain on an 8x8 board
pub const MAX_CHAIN: usize = 12;

/// One hop of a move
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub from: Square,
    pub to: Square,
    /// Cell code of the piece jumped over, `EMPTY` for a plain step
    pub captured: Cell,
    /// The man was crowned on landing
    pub promoted: bool,
}

impl Step {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captured: EMPTY,
            promoted: false,
        }
    }

    /// Steps two diagonals long are jumps
    #[inline]
    pub fn is_jump(&self) -> bool {
        self.from.x.abs_diff(self.to.x) > 1
    }
}

/// A full turn: one or more steps made by a single piece.
///
/// Equality compares endpoints only; capture and promotion records are
/// bookkeeping filled in when the move is applied.
#[derive(Debug, Clone)]
pub struct Move {
    steps: SmallVec<[Step; 4]>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        let mut steps = SmallVec::new();
        steps.push(Step::new(from, to));
        Self { steps }
    }

    /// Append the steps of `next` as a continuation of this chain
    pub fn extend_with(&mut self, next: &Move) {
        debug_assert_eq!(self.destination(), next.from());
        debug_assert!(self.steps.len() + next.steps.len() <= MAX_CHAIN);
        self.steps.extend_from_slice(&next.steps);
    }

    /// Origin of the whole chain
    #[inline]
    pub fn from(&self) -> Square {
        self.steps[0].from
    }

    /// Destination of the first step
    #[inline]
    pub fn to(&self) -> Square {
        self.steps[0].to
    }

    /// Final landing square of the chain
    #[inline]
    pub fn destination(&self) -> Square {
        self.steps[self.steps.len() - 1].to
    }

    #[inline]
    pub fn is_jump(&self) -> bool {
        self.steps[0].is_jump()
    }

    /// Cell code captured by the first step
    #[inline]
    pub fn piece_captured(&self) -> Cell {
        self.steps[0].captured
    }

    /// Any step of the chain crowned the piece
    pub fn promoted(&self) -> bool {
        self.steps.iter().any(|s| s.promoted)
    }

    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[inline]
    pub(crate) fn steps_mut(&mut self) -> &mut [Step] {
        &mut self.steps
    }

    /// Number of pieces this move captures
    pub fn capture_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_jump()).count()
    }

    /// PDN notation: `from-to` for a step, `fromxto` for a capture
    pub fn to_pdn(&self) -> String {
        let separator = if self.piece_captured() != EMPTY { 'x' } else { '-' };
        format!(
            "{}{}{}",
            square_number(self.from()),
            separator,
            square_number(self.destination())
        )
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.steps.len() == other.steps.len()
            && self
                .steps
                .iter()
                .zip(other.steps.iter())
                .all(|(a, b)| a.from == b.from && a.to == b.to)
    }
}

impl Eq for Move {}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from())?;
        for step in &self.steps {
            write!(f, "{}{}", if step.is_jump() { 'x' } else { '-' }, step.to)?;
        }
        Ok(())
    }
}

/// Standard checkers square number (1..=32) for a dark square
#[inline]
pub fn square_number(sq: Square) -> u8 {
    sq.y * 4 + (7 - sq.x) / 2 + 1
}

/// Textual transcript of one game in PDN style
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    event: String,
    moves: Vec<String>,
}

impl GameLog {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            moves: Vec::new(),
        }
    }

    pub fn push(&mut self, mv: &Move) {
        self.moves.push(mv.to_pdn());
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Recorded plies in PDN notation
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// Number of plies recorded
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Render as `[Event "..."]` followed by numbered move pairs and `*`
    pub fn to_pdn(&self) -> String {
        let mut out = format!("[Event \"{}\"]\n", self.event);
        for (ply, mv) in self.moves.iter().enumerate() {
            if ply % 2 == 0 {
                out.push_str(&format!("{}. ", ply / 2 + 1));
            }
            out.push_str(mv);
            out.push(' ');
        }
        out.push('*');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BLACK_MAN;

    #[test]
    fn test_square_numbers() {
        // Corners of the dark squares
        assert_eq!(square_number(Square::new(0, 0)), 4);
        assert_eq!(square_number(Square::new(6, 0)), 1);
        assert_eq!(square_number(Square::new(7, 7)), 29);
        assert_eq!(square_number(Square::new(1, 7)), 32);
        assert_eq!(square_number(Square::new(1, 1)), 8);
    }

    #[test]
    fn test_move_accessors() {
        let mut mv = Move::new(Square::new(2, 2), Square::new(4, 4));
        mv.extend_with(&Move::new(Square::new(4, 4), Square::new(6, 6)));
        assert_eq!(mv.from(), Square::new(2, 2));
        assert_eq!(mv.to(), Square::new(4, 4));
        assert_eq!(mv.destination(), Square::new(6, 6));
        assert!(mv.is_jump());
        assert_eq!(mv.capture_count(), 2);
        assert_eq!(mv.to_string(), "(2,2)x(4,4)x(6,6)");
    }

    #[test]
    fn test_move_equality_ignores_records() {
        let a = Move::new(Square::new(2, 2), Square::new(4, 4));
        let mut b = a.clone();
        b.steps_mut()[0].captured = BLACK_MAN;
        assert_eq!(a, b);

        let mut c = a.clone();
        c.extend_with(&Move::new(Square::new(4, 4), Square::new(2, 6)));
        assert_ne!(a, c);
    }

    #[test]
    fn test_pdn_notation() {
        let step = Move::new(Square::new(2, 2), Square::new(3, 3));
        assert_eq!(step.to_pdn(), "11-15");

        let mut jump = Move::new(Square::new(2, 2), Square::new(4, 4));
        jump.steps_mut()[0].captured = crate::board::WHITE_MAN;
        assert_eq!(jump.to_pdn(), "11x18");
    }

    #[test]
    fn test_game_log_format() {
        let mut log = GameLog::new("test");
        log.push(&Move::new(Square::new(2, 2), Square::new(3, 3)));
        log.push(&Move::new(Square::new(3, 5), Square::new(2, 4)));
        log.push(&Move::new(Square::new(0, 2), Square::new(1, 3)));
        assert_eq!(log.len(), 3);
        assert_eq!(log.to_pdn(), "[Event \"test\"]\n1. 11-15 23-19 2. 12-16 *");
    }
}
