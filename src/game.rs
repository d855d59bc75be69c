//! Game state and move execution.
//!
//! [`GameState`] is the single authoritative state of a game: the board,
//! which side this agent plays, how many half-moves have been made and whose
//! turn it is. Moves are applied in place; the search explores speculative
//! lines on independent clones.

use crate::board::{Board, Pos};
use crate::piece::{PieceId, Player};
use crate::rules::{Move, MoveKind, classify, push_target};

/// Apply a move that [`classify`] has already accepted.
///
/// # Panics
///
/// Panics on [`MoveKind::Illegal`]. Feeding an illegal move here means the
/// caller skipped classification, which is a bug rather than a game event.
pub fn apply_move(board: &mut Board, mv: Move, kind: MoveKind) {
    match kind {
        MoveKind::Illegal => panic!("illegal move {mv} applied to the board"),
        MoveKind::NoMove => {}
        MoveKind::Simple | MoveKind::Long => {
            let piece = occupant(board, mv.from);
            relocate(board, mv.from, mv.to, piece);
        }
        MoveKind::Swap => {
            let magician = occupant(board, mv.from);
            let other = occupant(board, mv.to);
            board.place(mv.to, magician);
            board.place(mv.from, other);
        }
        MoveKind::Push => {
            let pusher = occupant(board, mv.from);
            let pushed = occupant(board, mv.to);
            relocate(board, mv.to, push_target(mv), pushed);
            board.clear(mv.from);
            board.place(mv.to, pusher);
        }
    }
}

fn occupant(board: &Board, pos: Pos) -> PieceId {
    match board.piece_at(pos) {
        Some(id) => id,
        None => panic!("no piece at {pos} for a classified move"),
    }
}

/// Move a piece onto an empty cell, scoring it if the cell is a house.
fn relocate(board: &mut Board, from: Pos, to: Pos, piece: PieceId) {
    board.clear(from);
    board.place(to, piece);
    if board.is_house(to) {
        board.mark_arrived(piece, to);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    /// Side the agent plays; evaluation is always from this side.
    pub me: Player,
    /// Half-moves executed so far.
    pub steps: u32,
    /// Side to move.
    pub current: Player,
}

impl GameState {
    /// Standard starting position with the given houses.
    pub fn new(houses: &[Pos], me: Player) -> Self {
        Self::from_board(Board::standard(houses), me, Player::First)
    }

    /// Wrap an arbitrary board, e.g. a hand-built test position.
    pub fn from_board(board: Board, me: Player, current: Player) -> Self {
        Self {
            board,
            me,
            steps: 0,
            current,
        }
    }

    /// Classify and apply `mv`, then hand the turn over.
    ///
    /// Returns the move kind. Panics if the move is illegal.
    pub fn play(&mut self, mv: Move) -> MoveKind {
        let kind = classify(&self.board, mv);
        self.apply(mv, kind);
        kind
    }

    /// Apply an already-classified move and hand the turn over.
    pub fn apply(&mut self, mv: Move, kind: MoveKind) {
        apply_move(&mut self.board, mv, kind);
        self.pass_turn();
    }

    /// Count a half-move without changing the board.
    pub fn pass_turn(&mut self) {
        self.steps += 1;
        self.current = self.current.opponent();
    }

    #[inline]
    pub fn my_turn(&self) -> bool {
        self.current == self.me
    }

    /// Whether no house is left to reach.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.board.free_houses().is_empty()
    }

    /// Whether the turn loop should stop.
    pub fn is_over(&self, max_steps: u32) -> bool {
        self.steps >= max_steps || self.is_finished()
    }
}
