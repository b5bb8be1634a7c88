//! Board structure with embedded piece counters

use std::fmt;

use super::{
    is_piece, Cell, Color, Square, BLACK, BLACK_KING, BLACK_MAN, BOARD_SIZE, EMPTY, FREE, KING,
    MAN, PIECES_PER_SIDE, WHITE, WHITE_KING, WHITE_MAN,
};
use crate::error::{CheckersError, CheckersResult};

/// Light square holding the live black piece count
const BLACK_COUNT: Square = Square { x: 0, y: 1 };
/// Light square holding the live white piece count
const WHITE_COUNT: Square = Square { x: 0, y: 3 };

/// Per-rank piece tally from a full board scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PieceCounts {
    pub white_men: u8,
    pub black_men: u8,
    pub white_kings: u8,
    pub black_kings: u8,
}

impl PieceCounts {
    #[inline]
    pub fn black(&self) -> u8 {
        self.black_men + self.black_kings
    }

    #[inline]
    pub fn white(&self) -> u8 {
        self.white_men + self.white_kings
    }

    #[inline]
    pub fn total(&self) -> u8 {
        self.black() + self.white()
    }
}

/// 8x8 checkers board indexed as `cells[x][y]`.
///
/// Two light squares, `(0,1)` and `(0,3)`, store the black and white piece
/// counts. They are kept in step with every placement, capture and undo so
/// winner detection never needs a rescan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Board in the standard starting position
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// Board with no pieces and both counters at zero
    pub fn empty() -> Self {
        let mut cells = [[EMPTY; BOARD_SIZE]; BOARD_SIZE];
        for (x, column) in cells.iter_mut().enumerate() {
            for (y, cell) in column.iter_mut().enumerate() {
                if (x + y) % 2 == 1 {
                    *cell = FREE;
                }
            }
        }
        cells[BLACK_COUNT.x as usize][BLACK_COUNT.y as usize] = 0;
        cells[WHITE_COUNT.x as usize][WHITE_COUNT.y as usize] = 0;
        Self { cells }
    }

    /// Build a board from raw cells, recomputing the counters
    pub fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = Self { cells };
        board.recount();
        board
    }

    /// Put twelve men per side on the first three rows of each side
    pub fn reset(&mut self) {
        *self = Self::empty();
        for y in 0..3u8 {
            for x in (0..BOARD_SIZE as u8).step_by(2) {
                self.cells[(x + y % 2) as usize][y as usize] = BLACK_MAN;
            }
        }
        for y in 5..BOARD_SIZE as u8 {
            for x in (0..BOARD_SIZE as u8).step_by(2) {
                self.cells[(x + y % 2) as usize][y as usize] = WHITE_MAN;
            }
        }
        self.set_count(Color::Black, PIECES_PER_SIDE);
        self.set_count(Color::White, PIECES_PER_SIDE);
    }

    /// Raw transfer view, counter cells included
    #[inline]
    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Get cell code at square
    #[inline]
    pub fn get(&self, sq: Square) -> Cell {
        self.cells[sq.x as usize][sq.y as usize]
    }

    /// Write a cell without touching the counters.
    /// Callers must restore the counter invariant themselves.
    #[inline]
    pub(crate) fn set(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.x as usize][sq.y as usize] = cell;
    }

    /// Put a piece on a dark square, replacing any occupant
    pub fn place(&mut self, sq: Square, cell: Cell) {
        debug_assert!(sq.is_dark());
        self.clear(sq);
        self.set(sq, cell);
        if let Some(color) = Color::of(cell) {
            self.increment_count(color);
        }
    }

    /// Remove whatever piece stands on a dark square
    pub fn clear(&mut self, sq: Square) {
        debug_assert!(sq.is_dark());
        if let Some(color) = Color::of(self.get(sq)) {
            self.decrement_count(color);
        }
        self.set(sq, EMPTY);
    }

    /// Live piece count for a color, read from its counter cell
    #[inline]
    pub fn piece_count(&self, color: Color) -> u8 {
        self.get(Self::count_square(color))
    }

    #[inline]
    pub(crate) fn increment_count(&mut self, color: Color) {
        let sq = Self::count_square(color);
        self.set(sq, self.get(sq).wrapping_add(1));
    }

    #[inline]
    pub(crate) fn decrement_count(&mut self, color: Color) {
        let sq = Self::count_square(color);
        self.set(sq, self.get(sq).wrapping_sub(1));
    }

    #[inline]
    fn set_count(&mut self, color: Color, count: u8) {
        self.set(Self::count_square(color), count);
    }

    #[inline]
    fn count_square(color: Color) -> Square {
        match color {
            Color::Black => BLACK_COUNT,
            Color::White => WHITE_COUNT,
        }
    }

    /// Recompute both counters from the dark squares
    pub fn recount(&mut self) {
        let counts = self.count_pieces();
        self.set_count(Color::Black, counts.black());
        self.set_count(Color::White, counts.white());
    }

    /// Full scan of men and kings per color
    pub fn count_pieces(&self) -> PieceCounts {
        let mut counts = PieceCounts::default();
        for sq in Square::dark_squares() {
            match self.get(sq) {
                WHITE_MAN => counts.white_men += 1,
                BLACK_MAN => counts.black_men += 1,
                WHITE_KING => counts.white_kings += 1,
                BLACK_KING => counts.black_kings += 1,
                _ => {}
            }
        }
        counts
    }

    /// Check the board for corruption: pieces on light squares, unknown
    /// codes on dark squares, or counters out of step with the pieces.
    pub fn validate(&self) -> CheckersResult<()> {
        for x in 0..BOARD_SIZE as u8 {
            for y in 0..BOARD_SIZE as u8 {
                let sq = Square::new(x, y);
                let code = self.get(sq);
                let ok = if sq.is_dark() {
                    matches!(code, EMPTY | BLACK_MAN | BLACK_KING | WHITE_MAN | WHITE_KING)
                } else {
                    sq == BLACK_COUNT || sq == WHITE_COUNT || code == FREE
                };
                if !ok {
                    return Err(CheckersError::CorruptBoard { square: sq, code });
                }
            }
        }

        let counts = self.count_pieces();
        for (color, actual) in [(Color::Black, counts.black()), (Color::White, counts.white())] {
            if self.piece_count(color) != actual {
                return Err(CheckersError::CorruptBoard {
                    square: Self::count_square(color),
                    code: self.piece_count(color),
                });
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Top row (`y = 7`) first; `b`/`w` men, `B`/`W` kings, `-` empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..BOARD_SIZE as u8).rev() {
            write!(f, "{} ", y)?;
            for x in 0..BOARD_SIZE as u8 {
                let sq = Square::new(x, y);
                let c = if !sq.is_dark() {
                    ' '
                } else {
                    let cell = self.get(sq);
                    match (cell & (BLACK | WHITE), cell & (MAN | KING)) {
                        (BLACK, MAN) => 'b',
                        (BLACK, KING) => 'B',
                        (WHITE, MAN) => 'w',
                        (WHITE, KING) => 'W',
                        _ if is_piece(cell) => '?',
                        _ => '-',
                    }
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  01234567")
    }
}
