//! Line detection for N×N boards.

use crate::{Board, Cell, Line, Mark};
use tracing::instrument;

/// Returns the winning mark, if any line is complete.
#[instrument(skip(board), fields(size = %board.size()))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}

/// Scans the whole board for a complete line.
///
/// Order is fixed: rows top to bottom, columns left to right, main
/// diagonal, anti-diagonal. The first complete line found is returned.
#[instrument(skip(board), fields(size = %board.size()))]
pub fn winning_line(board: &Board) -> Option<(Mark, Line)> {
    let n = board.size().get();

    for row in 0..n {
        if let Some(mark) = uniform(board, (0..n).map(|col| (row, col))) {
            return Some((mark, Line::Row(row)));
        }
    }

    for col in 0..n {
        if let Some(mark) = uniform(board, (0..n).map(|row| (row, col))) {
            return Some((mark, Line::Column(col)));
        }
    }

    if let Some(mark) = uniform(board, (0..n).map(|i| (i, i))) {
        return Some((mark, Line::MainDiagonal));
    }

    if let Some(mark) = uniform(board, (0..n).map(|i| (i, n - 1 - i))) {
        return Some((mark, Line::AntiDiagonal));
    }

    None
}

/// The mark shared by every cell in `coords`, compared against the first one.
fn uniform(board: &Board, mut coords: impl Iterator<Item = (usize, usize)>) -> Option<Mark> {
    let (r0, c0) = coords.next()?;
    let first = board.get(r0, c0)?.mark()?;
    coords
        .all(|(r, c)| board.get(r, c) == Some(Cell::Occupied(first)))
        .then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardSize;

    fn board(n: usize, marks: &[(usize, usize, Mark)]) -> Board {
        let mut board = Board::new(BoardSize::new(n).unwrap());
        for &(r, c, m) in marks {
            board.set(r, c, Cell::Occupied(m));
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::default()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let b = board(3, &[(0, 0, Mark::X), (0, 1, Mark::X), (0, 2, Mark::X)]);
        assert_eq!(winning_line(&b), Some((Mark::X, Line::Row(0))));
    }

    #[test]
    fn test_winner_last_column_large_board() {
        let marks: Vec<_> = (0..7).map(|r| (r, 6, Mark::O)).collect();
        let b = board(7, &marks);
        assert_eq!(winning_line(&b), Some((Mark::O, Line::Column(6))));
    }

    #[test]
    fn test_winner_main_diagonal() {
        let marks: Vec<_> = (0..5).map(|i| (i, i, Mark::O)).collect();
        let b = board(5, &marks);
        assert_eq!(winning_line(&b), Some((Mark::O, Line::MainDiagonal)));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let b = board(4, &[(0, 3, Mark::X), (1, 2, Mark::X), (2, 1, Mark::X), (3, 0, Mark::X)]);
        assert_eq!(winning_line(&b), Some((Mark::X, Line::AntiDiagonal)));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let b = board(4, &[(0, 0, Mark::X), (0, 1, Mark::X), (0, 2, Mark::X)]);
        assert_eq!(check_winner(&b), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let b = board(3, &[(0, 0, Mark::X), (0, 1, Mark::O), (0, 2, Mark::X)]);
        assert_eq!(check_winner(&b), None);
    }

    #[test]
    fn test_first_line_in_scan_order_is_reported() {
        // Seeded board with two complete rows; the upper one is reported.
        let b = board(
            3,
            &[
                (0, 0, Mark::O),
                (0, 1, Mark::O),
                (0, 2, Mark::O),
                (2, 0, Mark::X),
                (2, 1, Mark::X),
                (2, 2, Mark::X),
            ],
        );
        assert_eq!(winning_line(&b), Some((Mark::O, Line::Row(0))));
    }

    #[test]
    fn test_columns_checked_before_diagonals() {
        let b = board(
            3,
            &[
                (0, 0, Mark::O),
                (1, 0, Mark::O),
                (2, 0, Mark::O),
                (1, 1, Mark::O),
                (2, 2, Mark::O),
            ],
        );
        assert_eq!(winning_line(&b), Some((Mark::O, Line::Column(0))));
    }
}
