//! Move selection: windowed minimax over a fixed state budget.
//!
//! Every node first scores all of its moves with a one-ply look-ahead. Below
//! the last level the moves are then narrowed to those within
//! [`SearchConfig::margin`] of the best shallow score for the side to move,
//! and only the survivors are searched deeper. The agent maximises the
//! evaluation, the opponent is assumed to minimise it.
//!
//! Depth is not fixed: [`search_depth`] picks it from the branching factor so
//! that wide positions are searched shallower and the work per move stays
//! roughly constant.
//!
//! Before searching, [`shortcut`] tries a couple of hand-written magician
//! swaps that walk pieces towards free houses.

use crate::board::Pos;
use crate::constants::{MAX_DEPTH, NEAR_HOUSE, PRUNE_MARGIN, SEARCH_BUDGET};
use crate::diagnostics::Diagnostics;
use crate::eval::evaluate;
use crate::game::GameState;
use crate::movegen::{LegalMove, legal_moves};
use crate::piece::{PieceId, PieceKind};
use crate::rules::{Move, MoveKind, classify};

/// Search tuning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Approximate number of states one search may visit.
    pub budget: u64,
    /// Width of the pruning window around the best shallow score.
    pub margin: i32,
    /// Hard cap on the derived depth.
    pub max_depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            budget: SEARCH_BUDGET,
            margin: PRUNE_MARGIN,
            max_depth: MAX_DEPTH,
        }
    }
}

/// A move with the score it leads to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Scored {
    pub mv: Move,
    pub kind: MoveKind,
    pub score: i32,
}

/// Depth for a position with `branching` moves: `floor(ln budget / ln branching)`,
/// clamped to `0..=max_depth`.
pub fn search_depth(branching: usize, budget: u64, max_depth: u32) -> u32 {
    if branching < 2 || budget < 2 {
        return 0;
    }
    let depth = (budget as f64).ln() / (branching as f64).ln();
    (depth.floor() as u32).min(max_depth)
}

pub struct Searcher<'a> {
    config: SearchConfig,
    diag: &'a dyn Diagnostics,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(config: SearchConfig, diag: &'a dyn Diagnostics) -> Self {
        Self {
            config,
            diag,
            nodes: 0,
        }
    }

    /// States evaluated since this searcher was created.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Pick the move to play for the side to move.
    pub fn choose_move(&mut self, state: &GameState) -> Move {
        if let Some(mv) = shortcut(state) {
            self.diag.info(format_args!("shortcut swap {mv}"));
            return mv;
        }

        let branching = legal_moves(state, true).len();
        let depth = search_depth(branching, self.config.budget, self.config.max_depth);
        let start = self.nodes;
        let best = self.search(state, depth);
        self.diag.info(format_args!(
            "move {} ({:?}) score {} depth {} branching {} nodes {}",
            best.mv,
            best.kind,
            best.score,
            depth,
            branching,
            self.nodes - start
        ));
        best.mv
    }

    /// Best move for the side to move, looking `depth` extra plies ahead.
    ///
    /// At depth 0 every move is scored by the evaluation of its successor.
    pub fn search(&mut self, state: &GameState, depth: u32) -> Scored {
        let maximizing = state.my_turn();

        let mut lines: Vec<(Scored, GameState)> = legal_moves(state, true)
            .into_iter()
            .map(|LegalMove { mv, kind }| {
                let mut next = state.clone();
                next.apply(mv, kind);
                self.nodes += 1;
                let score = evaluate(&next);
                (Scored { mv, kind, score }, next)
            })
            .collect();

        if depth > 0 {
            rank(&mut lines, maximizing);
            let best = lines[0].0.score;
            let margin = self.config.margin;
            lines.retain(|(scored, _)| {
                if maximizing {
                    scored.score >= best.saturating_sub(margin)
                } else {
                    scored.score <= best.saturating_add(margin)
                }
            });
            self.diag.debug(format_args!(
                "depth {depth}: {} moves inside the window",
                lines.len()
            ));

            for (scored, next) in &mut lines {
                if !next.is_finished() {
                    scored.score = self.search(next, depth - 1).score;
                }
            }
        }

        rank(&mut lines, maximizing);
        match lines.into_iter().next() {
            Some((best, _)) => best,
            None => unreachable!("move list always holds the pass move"),
        }
    }
}

/// Stable sort, best move for the side to move first.
fn rank(lines: &mut [(Scored, GameState)], maximizing: bool) {
    if maximizing {
        lines.sort_by(|a, b| b.0.score.cmp(&a.0.score));
    } else {
        lines.sort_by(|a, b| a.0.score.cmp(&b.0.score));
    }
}

/// Hand-written swaps tried before searching.
///
/// - Magician near a free house: swap it with a clown that is not, so the
///   clown can walk in.
/// - Otherwise, acrobat near a free house: swap the magician there, setting
///   up the clown swap on a later turn.
///
/// Returns `None` when neither applies or the swap is not legal.
pub fn shortcut(state: &GameState) -> Option<Move> {
    let board = &state.board;
    let side = state.current;
    let locate = |kind: PieceKind, second: bool| {
        let id = PieceId::new(side, kind, second);
        if board.is_in_play(id) {
            board.position_of(id)
        } else {
            None
        }
    };
    let near = |pos: Pos| {
        board
            .distance_to_free_house(pos)
            .is_some_and(|d| d <= NEAR_HOUSE)
    };

    let magician = locate(PieceKind::Magician, false)?;
    let swap_with = |to: Pos| {
        let mv = Move::new(magician, to);
        (classify(board, mv) == MoveKind::Swap).then_some(mv)
    };

    if near(magician) {
        return [false, true]
            .into_iter()
            .filter_map(|second| locate(PieceKind::Clown, second))
            .filter(|&pos| !near(pos))
            .find_map(swap_with);
    }

    locate(PieceKind::Acrobat, false)
        .filter(|&pos| near(pos))
        .and_then(swap_with)
}
