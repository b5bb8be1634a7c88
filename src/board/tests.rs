use super::*;

#[test]
fn test_color_opponent() {
    assert_eq!(Color::Black.opponent(), Color::White);
    assert_eq!(Color::White.opponent(), Color::Black);
}

#[test]
fn test_color_of_cell() {
    assert_eq!(Color::of(BLACK_MAN), Some(Color::Black));
    assert_eq!(Color::of(WHITE_KING), Some(Color::White));
    assert_eq!(Color::of(EMPTY), None);
    assert_eq!(Color::of(FREE), None);
    // A color bit without a rank bit is not a piece
    assert_eq!(Color::of(BLACK), None);
}

#[test]
fn test_square_validity() {
    assert!(Square::is_valid(0, 0));
    assert!(Square::is_valid(7, 7));
    assert!(!Square::is_valid(-1, 0));
    assert!(!Square::is_valid(0, 8));
}

#[test]
fn test_square_offset_and_midpoint() {
    let sq = Square::new(2, 2);
    assert_eq!(sq.offset(1, 1), Some(Square::new(3, 3)));
    assert_eq!(sq.offset(-3, 0), None);
    assert_eq!(Square::new(7, 7).offset(1, -1), None);
    assert_eq!(sq.midpoint(Square::new(4, 4)), Square::new(3, 3));
    assert_eq!(sq.midpoint(Square::new(0, 4)), Square::new(1, 3));
}

#[test]
fn test_dark_squares_scan() {
    let squares: Vec<Square> = Square::dark_squares().collect();
    assert_eq!(squares.len(), 32);
    assert!(squares.iter().all(|sq| sq.is_dark()));
    assert_eq!(squares[0], Square::new(0, 0));
    assert_eq!(squares[1], Square::new(0, 2));
    assert_eq!(squares[4], Square::new(1, 1));
}

#[test]
fn test_starting_position() {
    let board = Board::new();
    assert_eq!(board.piece_count(Color::Black), 12);
    assert_eq!(board.piece_count(Color::White), 12);

    let counts = board.count_pieces();
    assert_eq!(counts.black_men, 12);
    assert_eq!(counts.white_men, 12);
    assert_eq!(counts.black_kings, 0);
    assert_eq!(counts.white_kings, 0);

    assert_eq!(board.get(Square::new(0, 0)), BLACK_MAN);
    assert_eq!(board.get(Square::new(1, 1)), BLACK_MAN);
    assert_eq!(board.get(Square::new(6, 2)), BLACK_MAN);
    assert_eq!(board.get(Square::new(1, 5)), WHITE_MAN);
    assert_eq!(board.get(Square::new(7, 7)), WHITE_MAN);
    assert_eq!(board.get(Square::new(2, 4)), EMPTY);
    assert_eq!(board.get(Square::new(3, 3)), EMPTY);
    assert!(board.validate().is_ok());
}

#[test]
fn test_reset_restores_start() {
    let mut board = Board::new();
    board.clear(Square::new(2, 2));
    board.place(Square::new(3, 3), WHITE_KING);
    board.reset();
    assert_eq!(board, Board::new());
}

#[test]
fn test_empty_board() {
    let board = Board::empty();
    assert_eq!(board.piece_count(Color::Black), 0);
    assert_eq!(board.piece_count(Color::White), 0);
    assert_eq!(board.get(Square::new(1, 0)), FREE);
    assert!(board.validate().is_ok());
}

#[test]
fn test_place_and_clear_keep_counts() {
    let mut board = Board::empty();
    board.place(Square::new(2, 2), BLACK_MAN);
    board.place(Square::new(4, 4), WHITE_KING);
    assert_eq!(board.piece_count(Color::Black), 1);
    assert_eq!(board.piece_count(Color::White), 1);

    // Replacing an occupant moves the count to the new color
    board.place(Square::new(2, 2), WHITE_MAN);
    assert_eq!(board.piece_count(Color::Black), 0);
    assert_eq!(board.piece_count(Color::White), 2);

    board.clear(Square::new(4, 4));
    assert_eq!(board.piece_count(Color::White), 1);
    assert!(board.validate().is_ok());
}

#[test]
fn test_from_cells_recounts() {
    let mut raw = *Board::empty().cells();
    raw[1][1] = BLACK_MAN;
    raw[3][3] = BLACK_KING;
    raw[5][5] = WHITE_MAN;
    let board = Board::from_cells(raw);
    assert_eq!(board.piece_count(Color::Black), 2);
    assert_eq!(board.piece_count(Color::White), 1);
}

#[test]
fn test_validate_rejects_light_square_piece() {
    let mut board = Board::empty();
    board.set(Square::new(1, 0), BLACK_MAN);
    match board.validate() {
        Err(crate::error::CheckersError::CorruptBoard { square, code }) => {
            assert_eq!(square, Square::new(1, 0));
            assert_eq!(code, BLACK_MAN);
        }
        other => panic!("expected corrupt board, got {:?}", other),
    }
}

#[test]
fn test_validate_rejects_stale_counter() {
    let mut board = Board::new();
    board.set(Square::new(0, 0), EMPTY);
    assert!(board.validate().is_err());
}

#[test]
fn test_display_marks_pieces() {
    let mut board = Board::empty();
    board.place(Square::new(0, 0), BLACK_MAN);
    board.place(Square::new(7, 7), WHITE_KING);
    let text = board.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "7  - - - W");
    assert_eq!(lines[7], "0 b - - - ");
}
