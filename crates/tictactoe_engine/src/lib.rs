//! Variable-size tic-tac-toe engine.
//!
//! A pure game-state engine for square boards from 3x3 up to 15x15:
//! board representation, move legality, win/tie detection and turn
//! sequencing. The engine performs no I/O. Each operation returns a
//! [`Transition`] carrying the next [`GameEngine`] and the [`Effect`]s a
//! persistence adapter should carry out.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameEngine, Mark, Outcome};
//!
//! let engine = GameEngine::new().configure(3).into_engine().start().into_engine();
//! let engine = [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]
//!     .into_iter()
//!     .fold(engine, |engine, (row, col)| engine.attempt_move(row, col).into_engine());
//!
//! assert_eq!(engine.outcome(), Outcome::Won(Mark::X));
//! assert_eq!(engine.move_count(), 5);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod rules;
mod types;

pub use action::{Effect, GameRef, GameResult, Rejection, SessionId};
pub use game::{GameEngine, Phase, Transition};
pub use rules::{check_winner, evaluate, is_full, winning_line};
pub use types::{
    Board, BoardSize, Cell, InvalidBoardSize, Line, MAX_BOARD_SIZE, MIN_BOARD_SIZE, Mark, Outcome,
};
