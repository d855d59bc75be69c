//! Static evaluation.
//!
//! The score is always from the point of view of [`GameState::me`], never the
//! side to move. Each piece on the board contributes independently:
//!
//! - a piece on a house contributes a flat bonus (ours) or penalty (theirs)
//!   and nothing else;
//! - otherwise a per-kind base weight, a zone-of-control term, a forward
//!   progress term along the columns and a distance-to-free-house term.
//!
//! The weight tables are asymmetric: our undeveloped pieces cost more than
//! theirs are worth.

use crate::constants::{
    ARRIVED_BONUS, ARRIVED_PENALTY, HOUSE_DISTANCE_WEIGHT, OPPONENT_KIND_WEIGHT, OWN_KIND_WEIGHT,
    PROGRESS_WEIGHT, ZONE_WEIGHT,
};
use crate::game::GameState;
use crate::piece::PieceId;
use crate::rules::in_zone;

/// Evaluate `state` for the agent's own side.
pub fn evaluate(state: &GameState) -> i32 {
    let board = &state.board;
    let mut score = 0;

    for id in PieceId::all() {
        let Some(pos) = board.position_of(id) else {
            continue;
        };
        let mine = id.owner() == state.me;

        if board.is_house(pos) {
            score += if mine { ARRIVED_BONUS } else { -ARRIVED_PENALTY };
            continue;
        }

        let kind = id.kind().index();
        let sign = if mine { 1 } else { -1 };

        score += if mine {
            OWN_KIND_WEIGHT[kind]
        } else {
            OPPONENT_KIND_WEIGHT[kind]
        };

        let trainer = board.active_trainer(id.owner().opponent());
        if in_zone(trainer, pos, false) {
            score -= sign * ZONE_WEIGHT[kind];
        }

        score += sign * PROGRESS_WEIGHT * pos.col;

        if let Some(distance) = board.distance_to_free_house(pos) {
            score -= sign * HOUSE_DISTANCE_WEIGHT * distance;
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Pos};
    use crate::piece::{PieceKind, Player};
    use crate::rules::Move;

    /// 3x4 board, houses at (0,3) and (2,3):
    ///
    /// ```text
    /// C . . A*     C = first clown, A = first acrobat (arrived)
    /// . T . .      T = first trainer
    /// . c . *      c = second clown, inside T's zone
    /// ```
    fn fixture(me: Player) -> GameState {
        let houses = [Pos::new(0, 3), Pos::new(2, 3)];
        let mut board = Board::new(3, 4, &houses);
        let acrobat = PieceId::new(Player::First, PieceKind::Acrobat, false);
        board.place(Pos::new(0, 0), PieceId::new(Player::First, PieceKind::Clown, false));
        board.place(Pos::new(1, 1), PieceId::new(Player::First, PieceKind::Trainer, false));
        board.place(Pos::new(2, 1), PieceId::new(Player::Second, PieceKind::Clown, false));
        board.place(Pos::new(0, 2), acrobat);
        let mut state = GameState::from_board(board, me, Player::First);
        state.play(Move::new(Pos::new(0, 2), Pos::new(0, 3)));
        state
    }

    #[test]
    fn test_fixture_bookkeeping() {
        let state = fixture(Player::First);
        assert_eq!(state.board.free_houses().len(), 1);
        assert!(state.board.free_houses().contains(&Pos::new(2, 3)));
    }

    #[test]
    fn test_exact_score_first() {
        // clown:    -30 + 0 - 4*5        = -50
        // acrobat:  +1000
        // trainer:    0 + 3 - 4*3        =  -9
        // opponent: +20 + 8 - 3 + 4*2    = +33
        assert_eq!(evaluate(&fixture(Player::First)), 974);
    }

    #[test]
    fn test_exact_score_second() {
        // their clown:   +20 - 0 + 4*5   = +40
        // their acrobat: -500
        // their trainer:   0 - 3 + 4*3   =  +9
        // our clown:     -30 - 8 + 3 - 4*2 = -43
        assert_eq!(evaluate(&fixture(Player::Second)), -494);
    }

    #[test]
    fn test_no_free_house_drops_distance() {
        let house = Pos::new(0, 1);
        let mut board = Board::new(2, 3, &[house]);
        board.place(Pos::new(1, 2), PieceId::new(Player::First, PieceKind::Magician, false));
        board.mark_arrived(PieceId::new(Player::Second, PieceKind::Acrobat, false), house);
        let state = GameState::from_board(board, Player::First, Player::First);

        // -10 + 3*2, nothing for distance
        assert_eq!(evaluate(&state), -4);
    }

    #[test]
    fn test_arrival_improves_score() {
        let house = Pos::new(0, 2);
        let board = {
            let mut b = Board::new(2, 3, &[house]);
            b.place(Pos::new(0, 1), PieceId::new(Player::First, PieceKind::Clown, false));
            b
        };
        let before = GameState::from_board(board, Player::First, Player::First);
        let mut after = before.clone();
        after.play(Move::new(Pos::new(0, 1), house));

        assert!(evaluate(&after) > evaluate(&before));
    }
}
