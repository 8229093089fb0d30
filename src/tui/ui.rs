//! Stateless UI rendering for N x N tic tac toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strum::IntoEnumIterator;
use tictactoe_engine::{Cell, GameEngine, Mark, Outcome, Phase};

use super::app::App;
use super::input;

const HELP: &str = "+/- size  s start  r restart  n new game  arrows+enter or click to play  q quit";

/// Renders the whole screen and returns the area of the board grid.
pub fn draw(frame: &mut Frame, app: &App) -> Rect {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(4), // Status
            Constraint::Min(5),    // Board + stats
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_status(frame, chunks[1], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(24)])
        .split(chunks[2]);
    let grid = draw_board(frame, body[0], app);
    draw_stats(frame, body[1], app);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);

    grid
}

/// Moves made by each player after `moves` total moves, X first.
pub fn moves_per_player(moves: u32) -> (u32, u32) {
    (moves.div_ceil(2), moves / 2)
}

/// Headline describing the game state.
pub fn status_line(engine: &GameEngine) -> String {
    let n = engine.size();
    let moves = engine.move_count();

    match (engine.phase(), engine.outcome()) {
        (Phase::Setup, _) => format!("Board {n}x{n}. Press s to start."),
        (Phase::Playing, Outcome::InProgress) => {
            format!("Move {}: {} to play", moves, engine.turn())
        }
        (Phase::Playing, Outcome::Won(mark)) => {
            let (x, o) = moves_per_player(moves);
            format!("{mark} wins! Game completed in {moves} moves (X: {x}, O: {o})")
        }
        (Phase::Playing, Outcome::Tied) => format!("Tie game after {moves} moves"),
    }
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let engine = app.engine();
    let color = match engine.outcome() {
        Outcome::Won(_) => Color::Green,
        Outcome::Tied => Color::Magenta,
        Outcome::InProgress => Color::Yellow,
    };

    let mut lines = vec![Line::from(Span::styled(
        status_line(engine),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    let detail = match (engine.session_id(), app.notice()) {
        (_, Some(notice)) => Span::styled(notice.to_string(), Style::default().fg(Color::Red)),
        (Some(session_id), None) => Span::styled(
            format!("Session {session_id}"),
            Style::default().fg(Color::DarkGray),
        ),
        (None, None) => Span::raw(""),
    };
    lines.push(Line::from(detail));

    let status = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) -> Rect {
    let engine = app.engine();
    let n = engine.size().get();
    let (width, height) = input::grid_extent(n);

    let outer = center_rect(area, width + 2, height + 2);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {n}x{n} "));
    let grid = block.inner(outer);
    frame.render_widget(block, outer);

    let line = engine.winning_line().map(|(_, line)| line);
    let rows: Vec<Line> = engine
        .board()
        .rows()
        .enumerate()
        .map(|(row, cells)| {
            let spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let on_line = line.is_some_and(|l| l.contains(n, row, col));
                    cell_span(engine, *cell, row, col, app.cursor() == (row, col), on_line)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(rows), grid);
    grid
}

fn cell_span(
    engine: &GameEngine,
    cell: Cell,
    row: usize,
    col: usize,
    is_cursor: bool,
    on_line: bool,
) -> Span<'static> {
    let background = if (row + col) % 2 == 0 {
        Color::Black
    } else {
        Color::Rgb(40, 40, 40)
    };

    let (symbol, base) = match cell {
        Cell::Empty if engine.accepts_move_at(row, col) => (" · ", Style::default().fg(Color::Gray)),
        Cell::Empty => (" · ", Style::default().fg(Color::DarkGray)),
        Cell::Occupied(Mark::X) => (" X ", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        Cell::Occupied(Mark::O) => (" O ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
    };

    let style = if is_cursor {
        base.bg(Color::White).fg(Color::Black)
    } else if on_line {
        base.bg(Color::Green).fg(Color::Black)
    } else {
        base.bg(background)
    };
    Span::styled(symbol, style)
}

fn draw_stats(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = match app.stats() {
        Some(stats) => Mark::iter()
            .map(|mark| Line::from(format!("{mark} wins: {}", stats.wins_for(mark))))
            .chain([
                Line::from(format!("Ties:   {}", stats.ties())),
                Line::from(format!("Total:  {}", stats.total_games())),
            ])
            .collect(),
        None => vec![Line::from(Span::styled(
            "Stats unavailable",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let panel = Paragraph::new(lines).block(Block::default().title(" Stats ").borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
