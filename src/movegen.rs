//! Legal move generation.
//!
//! Candidates are proposed by shape and then filtered through
//! [`classify`], so the rules live in exactly one place. The order is fixed:
//! one-step probes for every piece in play in id order, acrobat leaps,
//! magician swaps, and finally the pass move.

use crate::board::Pos;
use crate::constants::{LEAPS, STEPS};
use crate::game::GameState;
use crate::piece::{PieceId, PieceKind};
use crate::rules::{Move, MoveKind, classify};

/// A move together with its classification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LegalMove {
    pub mv: Move,
    pub kind: MoveKind,
}

/// All legal moves for the side to move. The pass move is always last.
///
/// Swap moves are only produced when `with_swaps` is set.
pub fn legal_moves(state: &GameState, with_swaps: bool) -> Vec<LegalMove> {
    let board = &state.board;
    let mut moves = Vec::with_capacity(64);
    let probe = |moves: &mut Vec<LegalMove>, from: Pos, to: Pos| {
        let mv = Move::new(from, to);
        let kind = classify(board, mv);
        if kind.is_legal() && kind != MoveKind::Swap {
            moves.push(LegalMove { mv, kind });
        }
    };

    let own: Vec<(PieceId, Pos)> = board
        .in_play()
        .filter(|id| id.owner() == state.current)
        .filter_map(|id| board.position_of(id).map(|pos| (id, pos)))
        .collect();

    for &(_, from) in &own {
        for step in STEPS {
            probe(&mut moves, from, from.offset(step));
        }
    }

    if let Some(&(_, from)) = own.iter().find(|(id, _)| id.kind() == PieceKind::Acrobat) {
        for leap in LEAPS {
            probe(&mut moves, from, from.offset(leap));
        }
    }

    if with_swaps {
        if let Some(&(magician, from)) = own.iter().find(|(id, _)| id.kind() == PieceKind::Magician) {
            for other in board.in_play().filter(|&id| id != magician) {
                let Some(to) = board.position_of(other) else {
                    continue;
                };
                let mv = Move::new(from, to);
                if classify(board, mv) == MoveKind::Swap {
                    moves.push(LegalMove {
                        mv,
                        kind: MoveKind::Swap,
                    });
                }
            }
        }
    }

    moves.push(LegalMove {
        mv: Move::NONE,
        kind: MoveKind::NoMove,
    });
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::piece::Player;

    fn id(owner: Player, kind: PieceKind) -> PieceId {
        PieceId::new(owner, kind, false)
    }

    #[test]
    fn test_pass_always_last() {
        let state = GameState::from_board(Board::new(3, 3, &[]), Player::First, Player::First);
        let moves = legal_moves(&state, true);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].mv, Move::NONE);
        assert_eq!(moves[0].kind, MoveKind::NoMove);
    }

    #[test]
    fn test_only_side_to_move() {
        let mut board = Board::new(5, 5, &[]);
        board.place(Pos::new(2, 2), id(Player::First, PieceKind::Clown));
        board.place(Pos::new(0, 0), id(Player::Second, PieceKind::Clown));
        let state = GameState::from_board(board, Player::First, Player::Second);

        let moves = legal_moves(&state, true);
        // (0,0) has three neighbours on the grid
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.mv == Move::NONE || m.mv.from == Pos::new(0, 0)));
    }

    #[test]
    fn test_acrobat_leaps_are_generated() {
        let mut board = Board::new(5, 5, &[]);
        board.place(Pos::new(2, 2), id(Player::First, PieceKind::Acrobat));
        let state = GameState::from_board(board, Player::First, Player::First);

        let moves = legal_moves(&state, true);
        let long = moves.iter().filter(|m| m.kind == MoveKind::Long).count();
        let simple = moves.iter().filter(|m| m.kind == MoveKind::Simple).count();
        assert_eq!(long, 8);
        assert_eq!(simple, 8);
    }

    #[test]
    fn test_swaps_on_request() {
        let mut board = Board::new(6, 6, &[]);
        board.place(Pos::new(0, 0), id(Player::First, PieceKind::Magician));
        board.place(Pos::new(0, 1), id(Player::First, PieceKind::Clown));
        board.place(Pos::new(5, 5), id(Player::Second, PieceKind::Clown));
        board.place(Pos::new(3, 5), id(Player::Second, PieceKind::Magician));
        let state = GameState::from_board(board, Player::First, Player::First);

        let without = legal_moves(&state, false);
        assert!(without.iter().all(|m| m.kind != MoveKind::Swap));

        let with = legal_moves(&state, true);
        let swaps: Vec<Move> = with
            .iter()
            .filter(|m| m.kind == MoveKind::Swap)
            .map(|m| m.mv)
            .collect();
        assert_eq!(
            swaps,
            vec![
                Move::new(Pos::new(0, 0), Pos::new(0, 1)),
                Move::new(Pos::new(0, 0), Pos::new(5, 5)),
            ]
        );
        assert_eq!(with.len(), without.len() + 2);
    }

    #[test]
    fn test_arrived_pieces_do_not_move() {
        let house = Pos::new(0, 1);
        let mut board = Board::new(3, 3, &[house]);
        let clown = id(Player::First, PieceKind::Clown);
        board.place(Pos::new(0, 0), clown);
        let mut state = GameState::from_board(board, Player::First, Player::First);
        state.play(Move::new(Pos::new(0, 0), house));
        state.pass_turn();

        let moves = legal_moves(&state, true);
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn test_deterministic() {
        let state = GameState::new(&[Pos::new(4, 8)], Player::First);
        assert_eq!(legal_moves(&state, true), legal_moves(&state, true));
    }
}
