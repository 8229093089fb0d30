//! Application state and logic.

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use tictactoe_engine::{BoardSize, Effect, GameEngine, Rejection, Transition};
use tracing::{debug, info};

use super::input;
use crate::persistence::StatsSnapshot;
use crate::sync::SyncReport;

/// Main application state.
///
/// Owns the engine. Every input is turned into one engine transition whose
/// effects are queued for the sync worker.
#[derive(Debug)]
pub struct App {
    engine: GameEngine,
    cursor: (usize, usize),
    stats: Option<StatsSnapshot>,
    notice: Option<String>,
    outbox: Vec<Effect>,
    grid: Rect,
    quit: bool,
}

impl App {
    /// Creates a new application in setup with a board of `size`.
    pub fn new(size: BoardSize) -> Self {
        Self {
            engine: GameEngine::with_size(size),
            cursor: (0, 0),
            stats: None,
            notice: None,
            outbox: vec![Effect::RefreshStats],
            grid: Rect::default(),
            quit: false,
        }
    }

    /// Gets the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Gets the keyboard cursor as `(row, col)`.
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Gets the latest statistics snapshot, if one has arrived.
    pub fn stats(&self) -> Option<&StatsSnapshot> {
        self.stats.as_ref()
    }

    /// Gets the one-line notice shown under the status.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// True once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Records where the board grid was drawn, for mouse hit-testing.
    pub fn set_grid(&mut self, grid: Rect) {
        self.grid = grid;
    }

    /// Drains effects queued since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.outbox)
    }

    fn apply(&mut self, op: impl FnOnce(GameEngine) -> Transition) -> Option<Rejection> {
        let transition = op(std::mem::take(&mut self.engine));
        let rejection = transition.rejection();
        let (engine, effects) = transition.into_parts();
        self.engine = engine;
        self.outbox.extend(effects);

        let last = self.engine.size().get() - 1;
        self.cursor = (self.cursor.0.min(last), self.cursor.1.min(last));
        rejection
    }

    fn resize(&mut self, size: usize) {
        match self.apply(|engine| engine.configure(size)) {
            Some(rejection) => self.notice = Some(rejection.to_string()),
            None => self.notice = None,
        }
    }

    fn play(&mut self, row: usize, col: usize) {
        if let Some(rejection) = self.apply(|engine| engine.attempt_move(row, col)) {
            debug!(%rejection, row, col, "Move ignored");
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        let size = self.engine.size().get();

        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                self.quit = true;
            }
            KeyCode::Char('+' | '=') => self.resize(size + 1),
            KeyCode::Char('-' | '_') => self.resize(size.saturating_sub(1)),
            KeyCode::Char('s' | 'r') => {
                self.notice = None;
                self.apply(GameEngine::start);
            }
            KeyCode::Char('n') => {
                self.notice = None;
                self.apply(GameEngine::reset);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let (row, col) = self.cursor;
                self.play(row, col);
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = input::move_cursor(self.cursor, key, size);
            }
            _ => {}
        }
    }

    /// Handles a left click at terminal position `(x, y)`.
    pub fn handle_click(&mut self, x: u16, y: u16) {
        let Some((row, col)) = input::cell_at(self.grid, self.engine.size().get(), x, y) else {
            return;
        };
        self.cursor = (row, col);
        self.play(row, col);
    }

    /// Folds in a report from the sync worker.
    pub fn handle_report(&mut self, report: SyncReport) {
        debug!(?report, "Handling sync report");

        match report {
            SyncReport::SessionCreated { game, session_id } => {
                self.apply(|engine| engine.attach_session(game, session_id));
            }
            SyncReport::StatsRefreshed(stats) => self.stats = Some(stats),
            SyncReport::Failed { operation, message } => {
                self.notice = Some(format!("Could not {}: {}", operation.replace('_', " "), message));
            }
        }
    }
}
