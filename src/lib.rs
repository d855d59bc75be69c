//! Circus-Bot: a minimax agent for a two-player circus board game.
//!
//! Each side owns seven pieces (two clowns, two strongmen, an acrobat, a
//! magician and a trainer) and races to park them on the houses scattered over
//! a 9x12 grid. Pieces move one step at a time; the acrobat can leap, the
//! strongman can push, the magician can swap places and the trainer freezes
//! enemy pieces next to it.
//!
//! ## Modules
//!
//! - [`constants`] - Grid dimensions, evaluation weights and search parameters
//! - [`piece`] - Players, piece kinds and the piece id encoding
//! - [`board`] - Grid, position index, houses and pieces in play
//! - [`rules`] - Move classification
//! - [`game`] - Game state and move execution
//! - [`movegen`] - Legal move generation
//! - [`eval`] - Static evaluation
//! - [`search`] - Windowed minimax and opening shortcuts
//! - [`diagnostics`] - Injectable diagnostic sinks
//! - [`protocol`] - Text protocol and turn loop
//!
//! ## Example
//!
//! ```
//! use circus_bot::board::Pos;
//! use circus_bot::diagnostics::Silent;
//! use circus_bot::game::GameState;
//! use circus_bot::piece::Player;
//! use circus_bot::search::{SearchConfig, Searcher};
//!
//! let houses: Vec<Pos> = (0..9).map(|row| Pos::new(row, 8)).collect();
//! let mut state = GameState::new(&houses, Player::First);
//!
//! let mut searcher = Searcher::new(SearchConfig::default(), &Silent);
//! let mv = searcher.choose_move(&state);
//! state.play(mv);
//! println!("played {mv}");
//! ```

pub mod board;
pub mod constants;
pub mod diagnostics;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod piece;
pub mod protocol;
pub mod rules;
pub mod search;
