//! Move legality.
//!
//! [`classify`] decides, without touching the board, which kind of move a
//! `(from, to)` pair is. Checks run in a fixed order and the first one that
//! decides wins:
//!
//! 1. the pass move is always [`MoveKind::NoMove`];
//! 2. null, off-grid, from-a-house and into-an-occupied-house moves are illegal;
//! 3. the opposing trainer's zone of control blocks both endpoints;
//! 4. a one-step move onto an empty cell is [`MoveKind::Simple`];
//! 5. otherwise the moving piece's kind may allow a leap, a push or a swap.

use std::fmt;

use crate::board::{Board, Pos};
use crate::piece::PieceKind;

/// An ordered `(from, to)` pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
}

impl Move {
    /// The pass move.
    pub const NONE: Move = Move {
        from: Pos::NONE,
        to: Pos::NONE,
    };

    #[inline]
    pub const fn new(from: Pos, to: Pos) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Classification of a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Illegal,
    /// Pass.
    NoMove,
    /// One step onto an empty cell.
    Simple,
    /// Acrobat leap over two cells.
    Long,
    /// Magician trades places with another piece.
    Swap,
    /// Strongman shoves the piece in front of it one cell further.
    Push,
}

impl MoveKind {
    #[inline]
    pub fn is_legal(self) -> bool {
        self != MoveKind::Illegal
    }
}

/// Whether `target` lies in a trainer's zone of control.
///
/// Houses are never blocked, and an inactive trainer blocks nothing.
#[inline]
pub fn in_zone(trainer: Option<Pos>, target: Pos, target_is_house: bool) -> bool {
    match trainer {
        Some(trainer) => !target_is_house && trainer.chebyshev(target) <= 1,
        None => false,
    }
}

/// Target cell of the piece shoved by a strongman moving `from -> to`.
#[inline]
pub fn push_target(mv: Move) -> Pos {
    mv.to + (mv.to - mv.from)
}

/// Classify `mv` against the current board.
pub fn classify(board: &Board, mv: Move) -> MoveKind {
    if mv == Move::NONE {
        return MoveKind::NoMove;
    }
    let Move { from, to } = mv;
    if from == to || !board.in_bounds(from) || !board.in_bounds(to) {
        return MoveKind::Illegal;
    }
    let source = board.cell(from);
    let dest = board.cell(to);
    if source.house || (dest.house && dest.piece.is_some()) {
        return MoveKind::Illegal;
    }
    let Some(mover) = source.piece else {
        return MoveKind::Illegal;
    };
    // trainers stay in play for the whole game
    if dest.house && mover.kind() == PieceKind::Trainer {
        return MoveKind::Illegal;
    }

    let trainer = board.active_trainer(mover.owner().opponent());
    if in_zone(trainer, from, source.house) || in_zone(trainer, to, dest.house) {
        return MoveKind::Illegal;
    }

    let delta = to - from;
    if dest.piece.is_none() {
        let step = if dest.house {
            from.manhattan(to)
        } else {
            from.chebyshev(to)
        };
        if step == 1 {
            return MoveKind::Simple;
        }
    }

    match mover.kind() {
        PieceKind::Clown | PieceKind::Trainer => MoveKind::Illegal,

        PieceKind::Acrobat => {
            if dest.piece.is_some() {
                return MoveKind::Illegal;
            }
            let straight = (delta.row == 0 || delta.col == 0) && from.manhattan(to) == 2;
            let diagonal = delta.row.abs() == 2 && delta.col.abs() == 2 && !dest.house;
            if straight || diagonal {
                MoveKind::Long
            } else {
                MoveKind::Illegal
            }
        }

        PieceKind::Strongman => {
            if dest.piece.is_none() || from.chebyshev(to) != 1 {
                return MoveKind::Illegal;
            }
            let beyond = push_target(mv);
            if !board.in_bounds(beyond) {
                return MoveKind::Illegal;
            }
            let landing = board.cell(beyond);
            let axis_aligned = delta.row == 0 || delta.col == 0;
            let pushes_trainer = dest.piece.is_some_and(|id| id.kind() == PieceKind::Trainer);
            if landing.piece.is_none()
                && (!landing.house || (axis_aligned && !pushes_trainer))
                && !in_zone(trainer, beyond, landing.house)
            {
                MoveKind::Push
            } else {
                MoveKind::Illegal
            }
        }

        PieceKind::Magician => match dest.piece {
            Some(other)
                if other.owner() == mover.owner()
                    || !matches!(other.kind(), PieceKind::Trainer | PieceKind::Magician) =>
            {
                MoveKind::Swap
            }
            _ => MoveKind::Illegal,
        },
    }
}
