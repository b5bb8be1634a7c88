//! Board representation for 8x8 checkers
//!
//! Cells hold small bitflag codes: a color bit (`BLACK`/`WHITE`) combined
//! with a rank bit (`MAN`/`KING`). Light squares are never played on and
//! hold `FREE`, except two of them which double as piece-count registers.

pub mod board;

#[cfg(test)]
mod tests;

use std::fmt;

// Re-exports
pub use board::{Board, PieceCounts};

/// Board size (8x8)
pub const BOARD_SIZE: usize = 8;

/// Raw cell code
pub type Cell = u8;

pub const EMPTY: Cell = 0;
pub const WHITE: Cell = 1;
pub const BLACK: Cell = 2;
pub const MAN: Cell = 4;
pub const KING: Cell = 8;
/// Unplayable (light) square
pub const FREE: Cell = 16;

pub const BLACK_MAN: Cell = BLACK | MAN;
pub const BLACK_KING: Cell = BLACK | KING;
pub const WHITE_MAN: Cell = WHITE | MAN;
pub const WHITE_KING: Cell = WHITE | KING;

/// Pieces each side starts with
pub const PIECES_PER_SIDE: u8 = 12;

/// True if the cell holds a piece of either color
#[inline]
pub fn is_piece(cell: Cell) -> bool {
    cell & (MAN | KING) != 0
}

#[inline]
pub fn is_king(cell: Cell) -> bool {
    cell & KING != 0
}

/// Piece colors. Black moves toward higher `y`, white toward lower `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Color bit used in cell codes
    #[inline]
    pub const fn bit(self) -> Cell {
        match self {
            Color::Black => BLACK,
            Color::White => WHITE,
        }
    }

    /// Row on which this color's men are crowned
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::Black => 7,
            Color::White => 0,
        }
    }

    /// Color of the piece in a cell, if any
    #[inline]
    pub fn of(cell: Cell) -> Option<Color> {
        if !is_piece(cell) {
            None
        } else if cell & BLACK != 0 {
            Some(Color::Black)
        } else if cell & WHITE != 0 {
            Some(Color::White)
        } else {
            None
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}

/// Grid coordinate, `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub x: u8,
    pub y: u8,
}

impl Square {
    #[inline]
    pub fn new(x: u8, y: u8) -> Self {
        debug_assert!(x < BOARD_SIZE as u8 && y < BOARD_SIZE as u8);
        Self { x, y }
    }

    #[inline]
    pub fn is_valid(x: i32, y: i32) -> bool {
        x >= 0 && x < BOARD_SIZE as i32 && y >= 0 && y < BOARD_SIZE as i32
    }

    /// Playable squares are the dark ones, where `x + y` is even
    #[inline]
    pub fn is_dark(self) -> bool {
        (self.x + self.y) % 2 == 0
    }

    /// Square displaced by `(dx, dy)`, or `None` off the board
    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Square> {
        let x = self.x as i32 + dx as i32;
        let y = self.y as i32 + dy as i32;
        if Square::is_valid(x, y) {
            Some(Square::new(x as u8, y as u8))
        } else {
            None
        }
    }

    /// Square halfway between two squares two diagonals apart
    #[inline]
    pub fn midpoint(self, other: Square) -> Square {
        Square::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }

    /// Iterate all dark squares, column by column
    pub fn dark_squares() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8)
            .flat_map(|x| ((x % 2)..BOARD_SIZE as u8).step_by(2).map(move |y| Square::new(x, y)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
