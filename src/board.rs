//! Grid geometry and piece bookkeeping.
//!
//! The [`Board`] owns the cell grid, the inverse index from piece id to
//! position, the set of still-free houses and the set of pieces still in
//! play. It knows nothing about the rules: [`Board::place`] and
//! [`Board::clear`] are raw primitives and the callers in
//! [`game`](crate::game) keep the two views in agreement.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, Sub};

use crate::constants::{HEIGHT, PIECE_ID_SPACE, WIDTH};
use crate::piece::{PieceId, PieceKind, Player};

/// A (row, column) coordinate. May lie outside the grid; check with
/// [`Board::in_bounds`] before touching cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    /// Sentinel used by the pass move. Never on the grid.
    pub const NONE: Pos = Pos { row: 25, col: -1 };

    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn chebyshev(self, other: Pos) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }

    #[inline]
    pub fn manhattan(self, other: Pos) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    #[inline]
    pub fn offset(self, (dr, dc): (i32, i32)) -> Pos {
        Pos::new(self.row + dr, self.col + dc)
    }
}

impl Add for Pos {
    type Output = Pos;

    #[inline]
    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Pos {
    type Output = Pos;

    #[inline]
    fn sub(self, rhs: Pos) -> Pos {
        Pos::new(self.row - rhs.row, self.col - rhs.col)
    }
}

/// Protocol form: row as a letter from `'A'`, column as a character from `'1'`.
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = (b'A' as i32 + self.row) as u8 as char;
        let col = (b'1' as i32 + self.col) as u8 as char;
        write!(f, "{row}{col}")
    }
}

/// One grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Set once at setup.
    pub house: bool,
    pub piece: Option<PieceId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    height: i32,
    width: i32,
    cells: Vec<Cell>,
    positions: [Option<Pos>; PIECE_ID_SPACE],
    houses: Vec<Pos>,
    free_houses: BTreeSet<Pos>,
    in_play: BTreeSet<PieceId>,
}

impl Board {
    /// An empty board of the given extent with the given house cells.
    ///
    /// Every valid piece id starts in play; none has a position yet.
    pub fn new(height: i32, width: i32, houses: &[Pos]) -> Self {
        assert!(height > 0 && width > 0, "empty grid {height}x{width}");
        let mut board = Board {
            height,
            width,
            cells: vec![Cell::default(); (height * width) as usize],
            positions: [None; PIECE_ID_SPACE],
            houses: Vec::with_capacity(houses.len()),
            free_houses: BTreeSet::new(),
            in_play: PieceId::all().collect(),
        };
        for &house in houses {
            assert!(board.in_bounds(house), "house {house:?} outside the grid");
            let i = board.idx(house);
            board.cells[i].house = true;
            if board.free_houses.insert(house) {
                board.houses.push(house);
            }
        }
        board
    }

    /// Standard-size board with both sides in their starting layout.
    ///
    /// No house may cover a starting square; [`read_setup`](crate::protocol::read_setup)
    /// rejects such setups.
    pub fn standard(houses: &[Pos]) -> Self {
        let mut board = Board::new(HEIGHT, WIDTH, houses);
        for player in Player::ALL {
            board.place_starting_pieces(player);
        }
        board
    }

    /// Put `player`'s seven pieces in the starting corner.
    ///
    /// The first player's pieces sit in the top-left corner; the second
    /// player's layout is mirrored onto the bottom rows.
    pub fn place_starting_pieces(&mut self, player: Player) {
        let layout = [
            (0, 0, PieceKind::Acrobat, false),
            (1, 0, PieceKind::Clown, false),
            (0, 1, PieceKind::Clown, true),
            (1, 1, PieceKind::Magician, false),
            (2, 0, PieceKind::Strongman, false),
            (0, 2, PieceKind::Strongman, true),
            (3, 0, PieceKind::Trainer, false),
        ];
        for (row, col, kind, second) in layout {
            let row = match player {
                Player::First => row,
                Player::Second => self.height - 1 - row,
            };
            self.place(Pos::new(row, col), PieceId::new(player, kind, second));
        }
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        (0..self.height).contains(&pos.row) && (0..self.width).contains(&pos.col)
    }

    #[inline]
    fn idx(&self, pos: Pos) -> usize {
        debug_assert!(self.in_bounds(pos), "{pos:?} outside the grid");
        (pos.row * self.width + pos.col) as usize
    }

    #[inline]
    pub fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[self.idx(pos)]
    }

    #[inline]
    pub fn piece_at(&self, pos: Pos) -> Option<PieceId> {
        self.cell(pos).piece
    }

    #[inline]
    pub fn is_house(&self, pos: Pos) -> bool {
        self.cell(pos).house
    }

    /// Current position of a piece, `None` if it is not on the board.
    #[inline]
    pub fn position_of(&self, id: PieceId) -> Option<Pos> {
        self.positions[id.index()]
    }

    /// Set the occupant of `pos` and point the index at it.
    ///
    /// Does not vacate the piece's previous cell and does not check what was
    /// at `pos` before.
    pub fn place(&mut self, pos: Pos, id: PieceId) {
        let i = self.idx(pos);
        self.cells[i].piece = Some(id);
        self.positions[id.index()] = Some(pos);
    }

    /// Empty a cell without touching the position index.
    pub fn clear(&mut self, pos: Pos) {
        let i = self.idx(pos);
        self.cells[i].piece = None;
    }

    /// All house cells in setup order.
    pub fn houses(&self) -> &[Pos] {
        &self.houses
    }

    /// Houses nobody has arrived at yet.
    pub fn free_houses(&self) -> &BTreeSet<Pos> {
        &self.free_houses
    }

    #[inline]
    pub fn is_in_play(&self, id: PieceId) -> bool {
        self.in_play.contains(&id)
    }

    /// Pieces that have not arrived at a house, in id order.
    pub fn in_play(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.in_play.iter().copied()
    }

    /// Record that `id` arrived at the house `pos`.
    pub fn mark_arrived(&mut self, id: PieceId, pos: Pos) {
        self.in_play.remove(&id);
        self.free_houses.remove(&pos);
    }

    /// Where `player`'s trainer stands, if it still controls its zone.
    pub fn active_trainer(&self, player: Player) -> Option<Pos> {
        let trainer = PieceId::new(player, PieceKind::Trainer, false);
        if self.is_in_play(trainer) {
            self.position_of(trainer)
        } else {
            None
        }
    }

    /// Manhattan distance from `pos` to the closest free house.
    pub fn distance_to_free_house(&self, pos: Pos) -> Option<i32> {
        self.free_houses.iter().map(|&h| h.manhattan(pos)).min()
    }

    /// Whether the grid and the position index describe the same placement.
    pub fn is_consistent(&self) -> bool {
        for row in 0..self.height {
            for col in 0..self.width {
                let pos = Pos::new(row, col);
                if let Some(id) = self.piece_at(pos) {
                    if self.position_of(id) != Some(pos) {
                        return false;
                    }
                }
            }
        }
        PieceId::all().all(|id| match self.position_of(id) {
            Some(pos) => self.in_bounds(pos) && self.piece_at(pos) == Some(id),
            None => true,
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = self.cell(Pos::new(row, col));
                let ch = match cell.piece {
                    Some(id) => {
                        let ch = match id.kind() {
                            PieceKind::Clown => 'c',
                            PieceKind::Strongman => 's',
                            PieceKind::Acrobat => 'a',
                            PieceKind::Magician => 'm',
                            PieceKind::Trainer => 't',
                        };
                        if id.owner() == Player::First {
                            ch.to_ascii_uppercase()
                        } else {
                            ch
                        }
                    }
                    None if cell.house => '*',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
