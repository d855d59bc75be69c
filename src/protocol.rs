//! Text protocol with the game server.
//!
//! The exchange is whitespace separated and line oriented:
//!
//! - setup: [`HOUSE_COUNT`] position tokens, then this agent's player id (`0` or `1`);
//! - on the opponent's turn one move token `<pos>-<pos>` is read;
//! - on our turn the chosen move is written as one `<pos>-<pos>` line.
//!
//! A position token is a row letter from `'A'` followed by a column character
//! from `'1'`, so `A1` is `(0, 0)` and the pass move reads `Z0-Z0`.
//!
//! ## Example
//!
//! ```no_run
//! use circus_bot::constants::MAX_STEPS;
//! use circus_bot::diagnostics::LogSink;
//! use circus_bot::protocol::{ProtocolError, play};
//! use circus_bot::search::SearchConfig;
//!
//! fn main() -> Result<(), ProtocolError> {
//!     let stdin = std::io::stdin();
//!     play(stdin.lock(), std::io::stdout(), SearchConfig::default(), MAX_STEPS, Box::new(LogSink))?;
//!     Ok(())
//! }
//! ```

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::board::Pos;
use crate::constants::{HEIGHT, HOUSE_COUNT, WIDTH};
use crate::diagnostics::Diagnostics;
use crate::game::GameState;
use crate::piece::Player;
use crate::rules::{Move, classify};
use crate::search::{SearchConfig, Searcher};

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("input ended while reading {0}")]
    UnexpectedEof(&'static str),
    #[error("bad position token {0:?}")]
    BadPosition(String),
    #[error("bad move token {0:?}")]
    BadMove(String),
    #[error("bad player id {0:?}")]
    BadPlayer(String),
    #[error("house {0} covers a starting square")]
    HouseOnStart(String),
}

/// Parse a two-character position token.
pub fn parse_pos(token: &str) -> Result<Pos, ProtocolError> {
    match token.as_bytes() {
        &[row, col] => Ok(Pos::new(
            row as i32 - b'A' as i32,
            col as i32 - b'1' as i32,
        )),
        _ => Err(ProtocolError::BadPosition(token.to_string())),
    }
}

/// Parse a five-character move token.
///
/// A wrong separator is reported and otherwise ignored.
pub fn parse_move(token: &str, diag: &dyn Diagnostics) -> Result<Move, ProtocolError> {
    let bytes = token.as_bytes();
    if bytes.len() != 5 || !token.is_ascii() {
        return Err(ProtocolError::BadMove(token.to_string()));
    }
    if bytes[2] != b'-' {
        diag.warn(format_args!("unexpected separator in move {token:?}"));
    }
    Ok(Move::new(parse_pos(&token[..2])?, parse_pos(&token[3..])?))
}

/// Whitespace-separated tokens pulled lazily from a reader.
pub struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<String>, ProtocolError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    fn expect(&mut self, what: &'static str) -> Result<String, ProtocolError> {
        self.next_token()?.ok_or(ProtocolError::UnexpectedEof(what))
    }
}

/// Read the houses and our player id and build the starting state.
pub fn read_setup<R: BufRead>(
    tokens: &mut Tokens<R>,
    diag: &dyn Diagnostics,
) -> Result<GameState, ProtocolError> {
    let mut houses = Vec::with_capacity(HOUSE_COUNT);
    for _ in 0..HOUSE_COUNT {
        let token = tokens.expect("house")?;
        houses.push(parse_pos(&token)?);
    }
    let token = tokens.expect("player id")?;
    let me = token
        .parse::<usize>()
        .ok()
        .and_then(Player::from_index)
        .ok_or_else(|| ProtocolError::BadPlayer(token.clone()))?;

    let on_grid = |h: &Pos| (0..HEIGHT).contains(&h.row) && (0..WIDTH).contains(&h.col);
    if let Some(bad) = houses.iter().find(|&&h| !on_grid(&h)) {
        return Err(ProtocolError::BadPosition(bad.to_string()));
    }

    let state = GameState::new(&houses, me);
    if let Some(bad) = houses.iter().find(|&&h| state.board.piece_at(h).is_some()) {
        return Err(ProtocolError::HouseOnStart(bad.to_string()));
    }

    diag.info(format_args!("playing as {me} with {} houses", houses.len()));
    Ok(state)
}

/// Plays one game against the server.
pub struct Agent {
    state: GameState,
    config: SearchConfig,
    max_steps: u32,
    diag: Box<dyn Diagnostics>,
}

impl Agent {
    pub fn new(
        state: GameState,
        config: SearchConfig,
        max_steps: u32,
        diag: Box<dyn Diagnostics>,
    ) -> Self {
        Self {
            state,
            config,
            max_steps,
            diag,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Alternate turns until the game is over or the input ends.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        tokens: &mut Tokens<R>,
        out: &mut W,
    ) -> Result<(), ProtocolError> {
        while !self.state.is_over(self.max_steps) {
            if self.state.my_turn() {
                let mv = self.own_move();
                writeln!(out, "{mv}")?;
                out.flush()?;
            } else {
                let Some(token) = tokens.next_token()? else {
                    self.diag.info(format_args!("input closed after {} steps", self.state.steps));
                    break;
                };
                self.opponent_move(&token);
            }
        }
        self.diag.info(format_args!(
            "game over after {} steps, {} houses free",
            self.state.steps,
            self.state.board.free_houses().len()
        ));
        Ok(())
    }

    /// Search, play and return our move.
    pub fn own_move(&mut self) -> Move {
        let mv = Searcher::new(self.config, self.diag.as_ref()).choose_move(&self.state);
        self.state.play(mv);
        mv
    }

    /// Apply the opponent's move token.
    ///
    /// Unreadable or illegal moves are reported and count as a pass.
    pub fn opponent_move(&mut self, token: &str) {
        let mv = match parse_move(token, self.diag.as_ref()) {
            Ok(mv) => mv,
            Err(err) => {
                self.diag.warn(format_args!("{err}, treating as pass"));
                self.state.pass_turn();
                return;
            }
        };
        let kind = classify(&self.state.board, mv);
        if kind.is_legal() {
            self.diag.debug(format_args!("opponent {mv} ({kind:?})"));
            self.state.apply(mv, kind);
        } else {
            self.diag.warn(format_args!("illegal opponent move {mv}, treating as pass"));
            self.state.pass_turn();
        }
    }
}

/// Read the setup from `input` and play a whole game, writing our moves to `out`.
pub fn play<R: BufRead, W: Write>(
    input: R,
    mut out: W,
    config: SearchConfig,
    max_steps: u32,
    diag: Box<dyn Diagnostics>,
) -> Result<GameState, ProtocolError> {
    let mut tokens = Tokens::new(input);
    let state = read_setup(&mut tokens, diag.as_ref())?;
    let mut agent = Agent::new(state, config, max_steps, diag);
    agent.run(&mut tokens, &mut out)?;
    Ok(agent.state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Silent;
    use crate::diagnostics::tests::Recorder;
    use crate::rules::MoveKind;
    use std::io::Cursor;

    const HOUSES: &str = "A9 B9 C9 D9 E9 F9 G9 H9 I9 B7 D7 F7 H7";

    #[test]
    fn test_parse_pos() {
        assert_eq!(parse_pos("A1").unwrap(), Pos::new(0, 0));
        assert_eq!(parse_pos("I9").unwrap(), Pos::new(8, 8));
        assert_eq!(parse_pos("C<").unwrap(), Pos::new(2, 11));
        assert!(parse_pos("A").is_err());
        assert!(parse_pos("A10").is_err());
    }

    #[test]
    fn test_pos_roundtrip_over_grid() {
        for row in 0..9 {
            for col in 0..12 {
                let pos = Pos::new(row, col);
                assert_eq!(parse_pos(&pos.to_string()).unwrap(), pos);
            }
        }
    }

    #[test]
    fn test_parse_move() {
        let mv = parse_move("C1-C2", &Silent).unwrap();
        assert_eq!(mv, Move::new(Pos::new(2, 0), Pos::new(2, 1)));
        assert_eq!(parse_move("Z0-Z0", &Silent).unwrap(), Move::NONE);
        assert!(parse_move("C1C2", &Silent).is_err());
        assert!(parse_move("C1-C2-", &Silent).is_err());
    }

    #[test]
    fn test_bad_separator_warns() {
        let sink = Recorder::default();
        let mv = parse_move("C1+C2", &sink).unwrap();
        assert_eq!(mv, Move::new(Pos::new(2, 0), Pos::new(2, 1)));
        assert_eq!(sink.lines.borrow().len(), 1);
        assert!(sink.lines.borrow()[0].starts_with("warn"));
    }

    #[test]
    fn test_tokens_across_lines() {
        let mut tokens = Tokens::new(Cursor::new("A1  B2\n\nC3\n"));
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("A1"));
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("B2"));
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("C3"));
        assert_eq!(tokens.next_token().unwrap(), None);
    }

    #[test]
    fn test_read_setup() {
        let mut tokens = Tokens::new(Cursor::new(format!("{HOUSES}\n1\n")));
        let state = read_setup(&mut tokens, &Silent).unwrap();
        assert_eq!(state.me, Player::Second);
        assert_eq!(state.board.houses().len(), 13);
        assert!(state.board.is_house(Pos::new(3, 6)));
        assert_eq!(state.current, Player::First);
    }

    #[test]
    fn test_read_setup_errors() {
        let mut tokens = Tokens::new(Cursor::new("A9 B9"));
        assert!(matches!(
            read_setup(&mut tokens, &Silent),
            Err(ProtocolError::UnexpectedEof("house"))
        ));

        let mut tokens = Tokens::new(Cursor::new(format!("{HOUSES} 2")));
        assert!(matches!(
            read_setup(&mut tokens, &Silent),
            Err(ProtocolError::BadPlayer(_))
        ));

        let mut tokens = Tokens::new(Cursor::new("Z9 B9 C9 D9 E9 F9 G9 H9 I9 B7 D7 F7 H7 0"));
        assert!(matches!(
            read_setup(&mut tokens, &Silent),
            Err(ProtocolError::BadPosition(_))
        ));

        // A1 holds the first player's acrobat
        let mut tokens = Tokens::new(Cursor::new("A1 B9 C9 D9 E9 F9 G9 H9 I9 B7 D7 F7 H7 0"));
        assert!(matches!(
            read_setup(&mut tokens, &Silent),
            Err(ProtocolError::HouseOnStart(ref token)) if token == "A1"
        ));
    }

    #[test]
    fn test_first_player_moves_immediately() {
        let input = format!("{HOUSES}\n0\n");
        let mut out = Vec::new();
        let state = play(Cursor::new(input), &mut out, SearchConfig::default(), 1, Box::new(Silent)).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 5);
        assert_eq!(state.steps, 1);
        assert!(state.board.is_consistent());
    }

    #[test]
    fn test_second_player_waits() {
        let input = format!("{HOUSES}\n1\nC1-C2\nB2-C3\n");
        let mut out = Vec::new();
        let state = play(Cursor::new(input), &mut out, SearchConfig::default(), 4, Box::new(Silent)).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(state.steps, 4);
    }

    #[test]
    fn test_input_end_stops_loop() {
        let input = format!("{HOUSES}\n1\n");
        let mut out = Vec::new();
        let state = play(Cursor::new(input), &mut out, SearchConfig::default(), 300, Box::new(Silent)).unwrap();
        assert!(out.is_empty());
        assert_eq!(state.steps, 0);
    }

    #[test]
    fn test_illegal_opponent_move_is_pass() {
        let mut tokens = Tokens::new(Cursor::new(format!("{HOUSES}\n1\n")));
        let state = read_setup(&mut tokens, &Silent).unwrap();
        let mut agent = Agent::new(state, SearchConfig::default(), 300, Box::new(Silent));

        let before = agent.state().board.clone();
        agent.opponent_move("A1-A2");
        assert_eq!(agent.state().board, before);
        assert_eq!(agent.state().steps, 1);
        assert!(agent.state().my_turn());

        agent.opponent_move("garbage");
        assert_eq!(agent.state().steps, 2);
    }

    #[test]
    fn test_opponent_move_applies() {
        let mut tokens = Tokens::new(Cursor::new(format!("{HOUSES}\n1\n")));
        let state = read_setup(&mut tokens, &Silent).unwrap();
        let mut agent = Agent::new(state, SearchConfig::default(), 300, Box::new(Silent));

        agent.opponent_move("C1-C2");
        let board = &agent.state().board;
        assert_eq!(board.piece_at(Pos::new(2, 0)), None);
        assert!(board.piece_at(Pos::new(2, 1)).is_some());
        assert_eq!(
            classify(board, Move::new(Pos::new(2, 1), Pos::new(2, 2))),
            MoveKind::Simple
        );
    }
}
