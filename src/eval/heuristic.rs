//! Hand-coded checkers evaluation
//!
//! Classic weighted-feature heuristic used as the benchmark opponent's
//! leaf evaluator. It scores:
//! - Material, with a bonus for trading down when ahead
//! - Back-rank guard, cramp and intact double corner
//! - Center control and edge penalties
//! - Tempo, weighted by game phase
//! - Kings trapped in the double corners
//! - "The move" (opposition parity) when material is level
//!
//! All terms are from black's point of view.

use serde::{Deserialize, Serialize};

use super::{LeafEvaluator, Score};
use crate::board::{
    Board, Color, Square, BLACK, BLACK_KING, BLACK_MAN, BOARD_SIZE, EMPTY, MAN, WHITE, WHITE_KING,
    WHITE_MAN,
};
use crate::error::CheckersResult;

/// Bonus for the side to move
const TURN: i32 = 2;
const BACK_RANK: i32 = 3;
const KING_CENTER: i32 = 5;
const MAN_CENTER: i32 = 1;
const MAN_EDGE: i32 = 1;
const KING_EDGE: i32 = 5;
const CRAMP: i32 = 5;
/// Tempo multipliers by phase
const OPENING: i32 = -2;
const MIDGAME: i32 = -1;
const ENDGAME: i32 = 2;
const INTACT_CORNER: i32 = 3;
const TRAPPED_KING: i32 = 15;

/// Back-rank occupancy code (bit per guarding man) to guard value
const BACK_RANK_TABLE: [i32; 16] = [0, -1, 1, 0, 1, 1, 2, 1, 1, 0, 7, 4, 2, 2, 9, 8];

/// Double-corner squares where a lone king gets trapped
const TRAP_CORNERS: [(u8, u8); 4] = [(0, 6), (1, 7), (6, 0), (7, 1)];

/// Per-piece positional skew added on top of the heuristic, used to
/// produce opponents with slightly different styles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bias {
    #[default]
    None,
    Right,
    Left,
    Bottom,
    Top,
}

impl Bias {
    fn weight(self, sq: Square) -> Score {
        match self {
            Bias::None => 0.0,
            Bias::Right => 0.005 * sq.x as Score,
            Bias::Left => 0.005 * (8 - sq.x) as Score,
            Bias::Bottom => 0.005 * sq.y as Score,
            Bias::Top => 0.005 * (8 - sq.y) as Score,
        }
    }
}

/// Evaluate the board with `to_move` about to play.
///
/// # Returns
/// Score from black's point of view
#[must_use]
pub fn evaluate(board: &Board, to_move: Color) -> Score {
    let at = |x: u8, y: u8| board.get(Square::new(x, y));

    let mut eval = match to_move {
        Color::Black => TURN,
        Color::White => -TURN,
    };

    // Cramp
    if at(0, 4) == BLACK_MAN && at(1, 5) == WHITE_MAN {
        eval += CRAMP;
    }
    if at(7, 3) == WHITE_MAN && at(6, 2) == BLACK_MAN {
        eval -= CRAMP;
    }

    // Back-rank guard
    let guard_code = |squares: [(u8, u8, usize); 4]| {
        squares
            .iter()
            .filter(|&&(x, y, _)| at(x, y) & MAN != 0)
            .map(|&(_, _, bit)| bit)
            .sum::<usize>()
    };
    let black_guard = guard_code([(0, 0, 1), (2, 0, 2), (4, 0, 4), (6, 0, 8)]);
    let white_guard = guard_code([(1, 7, 8), (3, 7, 4), (5, 7, 2), (7, 7, 1)]);
    eval += BACK_RANK * (BACK_RANK_TABLE[black_guard] - BACK_RANK_TABLE[white_guard]);

    // Material
    let counts = board.count_pieces();
    let (nbm, nbk) = (counts.black_men as i32, counts.black_kings as i32);
    let (nwm, nwk) = (counts.white_men as i32, counts.white_kings as i32);
    let v1 = 100 * nbm + 130 * nbk;
    let v2 = 100 * nwm + 130 * nwk;
    eval += v1 - v2;
    if v1 + v2 > 0 {
        eval += (250 * (v1 - v2)) / (v1 + v2);
    }
    let nm = nbm + nwm;
    let nk = nbk + nwk;

    // Intact double corner
    if at(6, 0) == BLACK_MAN && (at(5, 1) == BLACK_MAN || at(7, 1) == BLACK_MAN) {
        eval += INTACT_CORNER;
    }
    if at(1, 7) == WHITE_MAN && (at(0, 6) == WHITE_MAN || at(2, 6) == WHITE_MAN) {
        eval -= INTACT_CORNER;
    }

    // Center, edges and tempo
    let last = BOARD_SIZE as u8 - 1;
    let mut tempo = 0;
    for sq in Square::dark_squares() {
        let cell = board.get(sq);
        let center = (2..=5).contains(&sq.x) && (2..=5).contains(&sq.y);
        let edge = sq.x == 0 || sq.x == last || sq.y == 0 || sq.y == last;
        match cell {
            BLACK_MAN if center => eval += MAN_CENTER,
            BLACK_KING if center => eval += KING_CENTER,
            WHITE_MAN if center => eval -= MAN_CENTER,
            WHITE_KING if center => eval -= KING_CENTER,
            BLACK_MAN if edge => eval -= MAN_EDGE,
            BLACK_KING if edge => eval -= KING_EDGE,
            WHITE_MAN if edge => eval += MAN_EDGE,
            WHITE_KING if edge => eval += KING_EDGE,
            _ => {}
        }
        match cell {
            BLACK_MAN => tempo += sq.y as i32,
            WHITE_MAN => tempo -= (last - sq.y) as i32,
            _ => {}
        }
    }
    if nm >= 16 {
        eval += OPENING * tempo;
    }
    if (12..=15).contains(&nm) {
        eval += MIDGAME * tempo;
    }
    if nm < 9 {
        eval += ENDGAME * tempo;
    }

    // Kings trapped in the double corners by the side that is ahead
    let (black_total, white_total) = (nbm + nbk, nwm + nwk);
    for (x, y) in TRAP_CORNERS {
        if black_total > white_total && nwk < 3 && at(x, y) == WHITE_KING {
            eval -= TRAPPED_KING;
        }
        if white_total > black_total && nbk < 3 && at(x, y) == BLACK_KING {
            eval += TRAPPED_KING;
        }
    }

    // The move
    if black_total == white_total {
        let rows = match to_move {
            Color::Black => [0u8, 2, 4, 6],
            Color::White => [1u8, 3, 5, 7],
        };
        let stones = rows
            .iter()
            .flat_map(|&y| ((y % 2)..BOARD_SIZE as u8).step_by(2).map(move |x| (x, y)))
            .filter(|&(x, y)| at(x, y) != EMPTY)
            .count();
        let favorable = match to_move {
            Color::Black => stones % 2 == 1,
            Color::White => stones % 2 == 0,
        };
        let pieces = nm + nk;
        let mut delta = 0;
        if pieces <= 12 {
            delta += 1;
        }
        if pieces <= 10 {
            delta += 1;
        }
        if pieces <= 8 {
            delta += 2;
        }
        if pieces <= 6 {
            delta += 2;
        }
        eval += if favorable { delta } else { -delta };
    }

    eval as Score
}

/// Positional skew for `bias`, black pieces adding and white subtracting
fn bias_score(board: &Board, bias: Bias) -> Score {
    if bias == Bias::None {
        return 0.0;
    }
    Square::dark_squares()
        .map(|sq| {
            let cell = board.get(sq);
            if cell & BLACK != 0 {
                bias.weight(sq)
            } else if cell & WHITE != 0 {
                -bias.weight(sq)
            } else {
                0.0
            }
        })
        .sum()
}

/// [`LeafEvaluator`] wrapping [`evaluate`]
#[derive(Debug, Clone, Copy)]
pub struct HeuristicEvaluator {
    /// Side assumed to be on move at the leaf
    pub to_move: Color,
    pub bias: Bias,
}

impl HeuristicEvaluator {
    pub fn new(to_move: Color, bias: Bias) -> Self {
        Self { to_move, bias }
    }
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        Self::new(Color::White, Bias::None)
    }
}

impl LeafEvaluator for HeuristicEvaluator {
    fn evaluate(&mut self, board: &Board) -> CheckersResult<Score> {
        Ok(evaluate(board, self.to_move) + bias_score(board, self.bias))
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}
