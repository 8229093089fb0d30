//! Terminal UI for tic tac toe.

mod app;
mod input;
mod ui;

pub use app::App;
pub use ui::{moves_per_player, status_line};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::config::ClientConfig;
use crate::persistence::PersistenceClient;
use crate::sync::SyncHandle;

/// Runs the TUI until the user quits.
///
/// Logging must already be routed away from the terminal.
pub async fn run(config: &ClientConfig, client: Arc<dyn PersistenceClient>) -> Result<()> {
    info!(board_size = %config.board_size(), "Starting tictactoe TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut sync = SyncHandle::spawn(client);
    let mut app = App::new(*config.board_size());

    let res = run_app(&mut terminal, &mut app, &mut sync).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    sync.shutdown().await;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Event loop: fold in sync reports, draw, handle one input, dispatch effects.
#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    sync: &mut SyncHandle,
) -> Result<()> {
    loop {
        while let Some(report) = sync.try_next_report() {
            app.handle_report(report);
        }

        let mut grid = Default::default();
        terminal.draw(|f| grid = ui::draw(f, app))?;
        app.set_grid(grid);

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    debug!(code = ?key.code, "Key pressed");
                    app.handle_key(key.code);
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    debug!(x = mouse.column, y = mouse.row, "Mouse click");
                    app.handle_click(mouse.column, mouse.row);
                }
                _ => {}
            }
        }

        sync.dispatch(app.take_effects());

        if app.should_quit() {
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}
