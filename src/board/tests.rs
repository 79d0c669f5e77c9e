use super::*;

#[test]
fn test_player_opponent() {
    assert_eq!(Player::A.opponent(), Player::B);
    assert_eq!(Player::B.opponent(), Player::A);
    assert_eq!(Player::A.opponent().opponent(), Player::A);
}

#[test]
fn test_player_numbers() {
    assert_eq!(Player::A.number(), 1);
    assert_eq!(Player::B.number(), 2);
    assert_eq!(Player::from_number(1), Some(Player::A));
    assert_eq!(Player::from_number(2), Some(Player::B));
    assert_eq!(Player::from_number(0), None);
    assert_eq!(Player::from_number(3), None);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(3, 4);
    assert_eq!(pos.to_index(), 28);
    assert_eq!(Pos::from_index(28), pos);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(7, 7));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, -1));
    assert!(!Pos::is_valid(8, 0));
    assert!(!Pos::is_valid(0, 8));
}

#[test]
fn test_pos_on_board() {
    assert!(Pos::new(7, 7).is_on_board());
    assert!(!Pos { row: 8, col: 0 }.is_on_board());
    assert!(!Pos { row: 0, col: 8 }.is_on_board());
}

#[test]
fn test_pos_offset_stops_at_edge() {
    assert_eq!(Pos::new(0, 0).offset(-1, 0), None);
    assert_eq!(Pos::new(7, 7).offset(0, 1), None);
    assert_eq!(Pos::new(0, 7).offset(1, -1), Some(Pos::new(1, 6)));
}

#[test]
fn test_corner_and_edge() {
    for pos in [Pos::new(0, 0), Pos::new(0, 7), Pos::new(7, 0), Pos::new(7, 7)] {
        assert!(pos.is_corner());
        assert!(pos.is_edge());
    }
    assert!(!Pos::new(0, 3).is_corner());
    assert!(Pos::new(0, 3).is_edge());
    assert!(Pos::new(5, 7).is_edge());
    assert!(!Pos::new(3, 3).is_edge());

    let edges = (0..TOTAL_CELLS).map(Pos::from_index).filter(|p| p.is_edge()).count();
    assert_eq!(edges, 28);
}

#[test]
fn test_pos_ordering() {
    assert!(Pos::new(0, 0) < Pos::new(0, 1));
    assert!(Pos::new(0, 7) < Pos::new(1, 0));
}

#[test]
fn test_opening_board() {
    let board = Board::new();
    assert_eq!(board.get(Pos::new(3, 3)), Cell::B);
    assert_eq!(board.get(Pos::new(3, 4)), Cell::A);
    assert_eq!(board.get(Pos::new(4, 3)), Cell::A);
    assert_eq!(board.get(Pos::new(4, 4)), Cell::B);
    assert_eq!(board.disc_count(), 4);
    assert_eq!(board.scoreboard(), Scoreboard { count_a: 2, count_b: 2 });
}

#[test]
fn test_set_overwrites() {
    let mut board = Board::empty();
    let pos = Pos::new(2, 2);
    board.set(pos, Cell::A);
    board.set(pos, Cell::B);
    assert_eq!(board.get(pos), Cell::B);
    assert_eq!(board.disc_count(), 1);
    board.set(pos, Cell::Empty);
    assert!(board.is_empty(pos));
}

#[test]
fn test_cells_round_trip() {
    let board = Board::new();
    assert_eq!(Board::from_cells(&board.to_cells()), board);
}

#[test]
fn test_bitboard_iter_row_major() {
    let mut bb = Bitboard::new();
    bb.set(Pos::new(5, 1));
    bb.set(Pos::new(0, 6));
    bb.set(Pos::new(7, 7));
    let cells: Vec<Pos> = bb.iter_ones().collect();
    assert_eq!(cells, vec![Pos::new(0, 6), Pos::new(5, 1), Pos::new(7, 7)]);
    assert_eq!(bb.count(), 3);
}

#[test]
fn test_scoreboard_leader() {
    assert_eq!(Scoreboard { count_a: 5, count_b: 3 }.leader(), Some(Player::A));
    assert_eq!(Scoreboard { count_a: 1, count_b: 3 }.leader(), Some(Player::B));
    assert_eq!(Scoreboard { count_a: 32, count_b: 32 }.leader(), None);
}
