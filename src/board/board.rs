//! Board structure: two disc bitboards

use super::bitboard::Bitboard;
use super::{Cell, Player, Pos, BOARD_SIZE};

/// Game board. Cheap to copy; rules return a new board per move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Player A discs
    pub a: Bitboard,
    /// Player B discs
    pub b: Bitboard,
}

/// Disc counts per player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoreboard {
    pub count_a: u32,
    pub count_b: u32,
}

impl Scoreboard {
    #[inline]
    pub fn count(&self, player: Player) -> u32 {
        match player {
            Player::A => self.count_a,
            Player::B => self.count_b,
        }
    }

    /// Player with strictly more discs, `None` on a tie
    pub fn leader(&self) -> Option<Player> {
        match self.count_a.cmp(&self.count_b) {
            std::cmp::Ordering::Greater => Some(Player::A),
            std::cmp::Ordering::Less => Some(Player::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl Board {
    /// Canonical opening position: A on (3,4) and (4,3), B on (3,3) and (4,4)
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.set(Pos::new(3, 3), Cell::B);
        board.set(Pos::new(3, 4), Cell::A);
        board.set(Pos::new(4, 3), Cell::A);
        board.set(Pos::new(4, 4), Cell::B);
        board
    }

    pub const fn empty() -> Self {
        Self {
            a: Bitboard::new(),
            b: Bitboard::new(),
        }
    }

    /// Build from a row-major cell grid
    pub fn from_cells(cells: &[[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = Self::empty();
        for (row, line) in cells.iter().enumerate() {
            for (col, &cell) in line.iter().enumerate() {
                board.set(Pos::new(row as u8, col as u8), cell);
            }
        }
        board
    }

    pub fn to_cells(&self) -> [[Cell; BOARD_SIZE]; BOARD_SIZE] {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                *cell = self.get(Pos::new(row as u8, col as u8));
            }
        }
        cells
    }

    /// Get cell at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        if self.a.get(pos) {
            Cell::A
        } else if self.b.get(pos) {
            Cell::B
        } else {
            Cell::Empty
        }
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.a.get(pos) && !self.b.get(pos)
    }

    /// Overwrite a cell. Board setup only; game moves go through `rules::apply_move`.
    #[inline]
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        self.a.clear(pos);
        self.b.clear(pos);
        match cell {
            Cell::A => self.a.set(pos),
            Cell::B => self.b.set(pos),
            Cell::Empty => {}
        }
    }

    /// Discs of a player
    #[inline]
    pub fn discs(&self, player: Player) -> Bitboard {
        match player {
            Player::A => self.a,
            Player::B => self.b,
        }
    }

    #[inline]
    pub fn count(&self, player: Player) -> u32 {
        self.discs(player).count()
    }

    /// Total discs on board
    #[inline]
    pub fn disc_count(&self) -> u32 {
        self.a.count() + self.b.count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.disc_count() as usize == BOARD_SIZE * BOARD_SIZE
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            count_a: self.a.count(),
            count_b: self.b.count(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Disc counts for both players
#[inline]
pub fn scoreboard(board: &Board) -> Scoreboard {
    board.scoreboard()
}
