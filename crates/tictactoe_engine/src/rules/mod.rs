//! Game rules for variable-size tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the engine, the UI and tests can all evaluate a board
//! without going through a transition.

mod tie;
mod win;

pub use tie::{evaluate, is_full};
pub use win::{check_winner, winning_line};
