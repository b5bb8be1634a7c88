//! Legal move generation with forced captures and jump chains
//!
//! Pieces are scanned column by column over the dark squares. Men move
//! forward only (black toward higher `y`, white toward lower `y`); kings
//! use all four diagonals. As soon as any jump is found, plain steps are
//! discarded and only jumps are legal for the rest of the scan.

use crate::board::{is_piece, Board, Cell, Color, Square, BLACK, KING, WHITE};
use crate::error::{CheckersError, CheckersResult};
use crate::moves::Move;

use super::apply::AppliedMove;

/// Safety cap on moves produced by one generation call
pub const MAX_MOVES: usize = 128;

const BLACK_FORWARD: [(i8, i8); 2] = [(1, 1), (-1, 1)];
const WHITE_FORWARD: [(i8, i8); 2] = [(1, -1), (-1, -1)];

/// Moves for one side, plus whether capturing was forced
#[derive(Debug, Clone, Default)]
pub struct GeneratedMoves {
    pub moves: Vec<Move>,
    pub forced_jump: bool,
}

/// Diagonals a piece may move along, black-forward first
fn directions(cell: Cell) -> impl Iterator<Item = (i8, i8)> {
    let up = cell & (BLACK | KING) != 0;
    let down = cell & (WHITE | KING) != 0;
    BLACK_FORWARD
        .into_iter()
        .filter(move |_| up)
        .chain(WHITE_FORWARD.into_iter().filter(move |_| down))
}

/// Landing square of a jump from `from` along `(dx, dy)`, if one is legal
#[inline]
fn jump_target(board: &Board, color: Color, from: Square, dx: i8, dy: i8) -> Option<Square> {
    let over = from.offset(dx, dy)?;
    let land = from.offset(2 * dx, 2 * dy)?;
    let jumped = board.get(over);
    if is_piece(jumped) && jumped & color.bit() == 0 && !is_piece(board.get(land)) {
        Some(land)
    } else {
        None
    }
}

/// Generate all legal moves for `color`.
///
/// The board is borrowed mutably because each jump is applied while its
/// continuations are probed; it is restored before returning.
///
/// # Errors
/// `MoveListOverflow` past [`MAX_MOVES`], or any error from applying a
/// speculative jump.
pub fn generate_moves(board: &mut Board, color: Color) -> CheckersResult<GeneratedMoves> {
    let mut moves = Vec::new();
    let forced_jump = generate_moves_into(board, color, &mut moves)?;
    Ok(GeneratedMoves { moves, forced_jump })
}

/// Append the legal moves for `color` to `out`, returning whether capturing
/// is forced. Entries already in `out` are left alone; only moves appended
/// by this call are discarded when the first jump turns up.
pub fn generate_moves_into(
    board: &mut Board,
    color: Color,
    out: &mut Vec<Move>,
) -> CheckersResult<bool> {
    let base = out.len();
    let mut forced_jump = false;

    for from in Square::dark_squares() {
        let cell = board.get(from);
        if cell & color.bit() == 0 {
            continue;
        }
        for (dx, dy) in directions(cell) {
            try_move(board, color, from, dx, dy, base, out, &mut forced_jump)?;
        }
    }

    Ok(forced_jump)
}

#[allow(clippy::too_many_arguments)]
fn try_move(
    board: &mut Board,
    color: Color,
    from: Square,
    dx: i8,
    dy: i8,
    base: usize,
    out: &mut Vec<Move>,
    forced_jump: &mut bool,
) -> CheckersResult<()> {
    let Some(next) = from.offset(dx, dy) else {
        return Ok(());
    };

    if !is_piece(board.get(next)) {
        if !*forced_jump {
            push_move(out, base, Move::new(from, next))?;
        }
        return Ok(());
    }

    let Some(land) = jump_target(board, color, from, dx, dy) else {
        return Ok(());
    };
    if !*forced_jump {
        out.truncate(base);
        *forced_jump = true;
    }

    let mut jump = Move::new(from, land);
    let extended = {
        let mut applied = AppliedMove::new(board, &mut jump)?;
        if applied.mv().promoted() {
            false
        } else {
            let chain = applied.mv().clone();
            extend_jumps(applied.board_mut(), color, &chain, base, out)?
        }
    };
    if !extended {
        push_move(out, base, jump)?;
    }
    Ok(())
}

/// Look for further jumps from the end of `chain`, pushing every complete
/// chain found. Returns whether any continuation existed.
///
/// A continuation may not land on the square the chain started from.
fn extend_jumps(
    board: &mut Board,
    color: Color,
    chain: &Move,
    base: usize,
    out: &mut Vec<Move>,
) -> CheckersResult<bool> {
    let at = chain.destination();
    let cell = board.get(at);
    if cell & color.bit() == 0 || !is_piece(cell) {
        return Err(CheckersError::NoPieceToJump { square: at });
    }

    let origin = chain.from();
    let mut found = false;
    for (dx, dy) in directions(cell) {
        let Some(land) = jump_target(board, color, at, dx, dy) else {
            continue;
        };
        if land == origin {
            continue;
        }
        found = true;

        let mut hop = Move::new(at, land);
        let mut full = chain.clone();
        let extended = {
            let mut applied = AppliedMove::new(board, &mut hop)?;
            full.extend_with(applied.mv());
            if applied.mv().promoted() {
                false
            } else {
                extend_jumps(applied.board_mut(), color, &full, base, out)?
            }
        };
        if !extended {
            push_move(out, base, full)?;
        }
    }
    Ok(found)
}

#[inline]
fn push_move(out: &mut Vec<Move>, base: usize, mv: Move) -> CheckersResult<()> {
    if out.len() - base >= MAX_MOVES {
        return Err(CheckersError::MoveListOverflow { limit: MAX_MOVES });
    }
    out.push(mv);
    Ok(())
}

/// True if `color` has at least one legal move. Does not touch the board.
pub fn has_any_move(board: &Board, color: Color) -> bool {
    Square::dark_squares().any(|from| {
        let cell = board.get(from);
        cell & color.bit() != 0
            && directions(cell).any(|(dx, dy)| match from.offset(dx, dy) {
                Some(next) if !is_piece(board.get(next)) => true,
                Some(_) => jump_target(board, color, from, dx, dy).is_some(),
                None => false,
            })
    })
}
