//! Players, piece kinds and piece identities.
//!
//! Every piece on the board has a [`PieceId`] that encodes its owner, its
//! kind and, for the two kinds each side owns twice, which of the pair it is.
//! Ids are dense: `owner * 8 + slot`, giving the range `0..16` with two gaps
//! (slot 7 of each owner), so tables indexed by id stay small.

use std::fmt;

use crate::constants::{PIECE_ID_SPACE, SLOTS_PER_OWNER};

/// One of the two sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Both players in protocol order.
    pub const ALL: [Player; 2] = [Player::First, Player::Second];

    /// Protocol number of this player (0 or 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    /// Player for a protocol number, `None` for anything but 0 or 1.
    pub fn from_index(index: usize) -> Option<Player> {
        match index {
            0 => Some(Player::First),
            1 => Some(Player::Second),
            _ => None,
        }
    }

    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// The five roles a piece can have.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    Clown,
    Strongman,
    Acrobat,
    Magician,
    Trainer,
}

impl PieceKind {
    pub const ALL: [PieceKind; 5] = [
        PieceKind::Clown,
        PieceKind::Strongman,
        PieceKind::Acrobat,
        PieceKind::Magician,
        PieceKind::Trainer,
    ];

    /// Index into per-kind weight tables.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PieceKind::Clown => 0,
            PieceKind::Strongman => 1,
            PieceKind::Acrobat => 2,
            PieceKind::Magician => 3,
            PieceKind::Trainer => 4,
        }
    }

    /// Whether each side owns two pieces of this kind.
    #[inline]
    pub fn is_paired(self) -> bool {
        matches!(self, PieceKind::Clown | PieceKind::Strongman)
    }

    /// First slot of this kind inside an owner's block of ids.
    fn base_slot(self) -> u8 {
        match self {
            PieceKind::Clown => 0,
            PieceKind::Strongman => 2,
            PieceKind::Acrobat => 4,
            PieceKind::Magician => 5,
            PieceKind::Trainer => 6,
        }
    }

    fn from_slot(slot: u8) -> Option<(PieceKind, bool)> {
        match slot {
            0 => Some((PieceKind::Clown, false)),
            1 => Some((PieceKind::Clown, true)),
            2 => Some((PieceKind::Strongman, false)),
            3 => Some((PieceKind::Strongman, true)),
            4 => Some((PieceKind::Acrobat, false)),
            5 => Some((PieceKind::Magician, false)),
            6 => Some((PieceKind::Trainer, false)),
            _ => None,
        }
    }
}

/// Identity of a single piece, stable for the whole game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(u8);

impl PieceId {
    /// Encode `(owner, kind, second)`.
    ///
    /// `second` picks the second piece of a paired kind and is ignored for
    /// kinds a side owns only once.
    pub fn new(owner: Player, kind: PieceKind, second: bool) -> PieceId {
        let variant = u8::from(second && kind.is_paired());
        PieceId(owner.index() as u8 * SLOTS_PER_OWNER + kind.base_slot() + variant)
    }

    /// Decode a raw index; gaps and out-of-range values yield `None`.
    pub fn from_index(index: usize) -> Option<PieceId> {
        if index >= PIECE_ID_SPACE {
            return None;
        }
        let slot = (index % SLOTS_PER_OWNER as usize) as u8;
        PieceKind::from_slot(slot).map(|_| PieceId(index as u8))
    }

    /// Every valid id in ascending order.
    pub fn all() -> impl Iterator<Item = PieceId> {
        (0..PIECE_ID_SPACE).filter_map(PieceId::from_index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn owner(self) -> Player {
        if self.0 < SLOTS_PER_OWNER {
            Player::First
        } else {
            Player::Second
        }
    }

    #[inline]
    pub fn kind(self) -> PieceKind {
        self.decode().0
    }

    /// Whether this is the second piece of a paired kind.
    #[inline]
    pub fn is_second(self) -> bool {
        self.decode().1
    }

    fn decode(self) -> (PieceKind, bool) {
        match PieceKind::from_slot(self.0 % SLOTS_PER_OWNER) {
            Some(decoded) => decoded,
            None => unreachable!("piece id {} sits in an unused slot", self.0),
        }
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.is_second() { "#2" } else { "" };
        write!(f, "{:?}{}@{}", self.kind(), suffix, self.owner())
    }
}
