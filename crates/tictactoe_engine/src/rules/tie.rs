//! Tie detection and full outcome evaluation.

use super::win::check_winner;
use crate::{Board, Outcome};
use tracing::instrument;

/// Checks if every cell on the board is occupied.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| !c.is_empty())
}

/// Evaluates the outcome of a board: a line wins, otherwise a full board ties.
#[instrument(skip(board), fields(size = %board.size()))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = check_winner(board) {
        Outcome::Won(mark)
    } else if is_full(board) {
        Outcome::Tied
    } else {
        Outcome::InProgress
    }
}
