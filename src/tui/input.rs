//! Cursor movement and mouse hit-testing for an N x N board.

use crossterm::event::KeyCode;
use ratatui::layout::{Position, Rect};

/// Terminal columns per board cell.
pub const CELL_WIDTH: u16 = 3;

/// Terminal rows per board cell.
pub const CELL_HEIGHT: u16 = 1;

/// Moves cursor based on arrow keys, stopping at the board edges.
pub fn move_cursor(cursor: (usize, usize), key: KeyCode, n: usize) -> (usize, usize) {
    let (row, col) = cursor;
    let last = n.saturating_sub(1);

    match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(last), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(last)),
        _ => cursor,
    }
}

/// Size in terminal cells of the grid for an N x N board.
pub fn grid_extent(n: usize) -> (u16, u16) {
    let n = u16::try_from(n).unwrap_or(u16::MAX);
    (n.saturating_mul(CELL_WIDTH), n.saturating_mul(CELL_HEIGHT))
}

/// Maps a terminal position to the `(row, col)` of the cell under it.
///
/// Only positions inside the drawn `grid` hit a cell, so cells clipped off
/// a small terminal never take clicks.
pub fn cell_at(grid: Rect, n: usize, x: u16, y: u16) -> Option<(usize, usize)> {
    if !grid.contains(Position { x, y }) {
        return None;
    }
    let col = usize::from((x - grid.x) / CELL_WIDTH);
    let row = usize::from((y - grid.y) / CELL_HEIGHT);
    (row < n && col < n).then_some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor((0, 0), KeyCode::Up, 5), (0, 0));
        assert_eq!(move_cursor((0, 0), KeyCode::Left, 5), (0, 0));
        assert_eq!(move_cursor((4, 4), KeyCode::Down, 5), (4, 4));
        assert_eq!(move_cursor((4, 4), KeyCode::Right, 5), (4, 4));
        assert_eq!(move_cursor((2, 2), KeyCode::Right, 5), (2, 3));
    }

    #[test]
    fn test_cell_at_maps_columns_by_width() {
        let grid = Rect::new(10, 5, 12, 4);
        assert_eq!(cell_at(grid, 4, 10, 5), Some((0, 0)));
        assert_eq!(cell_at(grid, 4, 12, 5), Some((0, 0)));
        assert_eq!(cell_at(grid, 4, 13, 6), Some((1, 1)));
        assert_eq!(cell_at(grid, 4, 21, 8), Some((3, 3)));
    }

    #[test]
    fn test_cell_at_outside_grid() {
        let grid = Rect::new(10, 5, 9, 3);
        assert_eq!(cell_at(grid, 3, 9, 5), None);
        assert_eq!(cell_at(grid, 3, 19, 5), None);
        assert_eq!(cell_at(grid, 3, 10, 8), None);
    }

    #[test]
    fn test_cell_at_ignores_clipped_cells() {
        // A 15x15 board squeezed into 34 columns shows 11 full cells.
        let grid = Rect::new(1, 9, 34, 15);
        assert_eq!(cell_at(grid, 15, 40, 9), None);
        assert_eq!(cell_at(grid, 15, 35, 9), None);
        assert_eq!(cell_at(grid, 15, 31, 9), Some((0, 10)));
        assert_eq!(cell_at(grid, 15, 1, 23), Some((14, 0)));
    }
}
