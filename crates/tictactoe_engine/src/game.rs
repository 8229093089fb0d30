//! Game engine with pure, value-returning transitions.
//!
//! [`GameEngine`] is a plain value. Every operation consumes it and returns
//! a [`Transition`] holding the next engine, the effects to hand to the
//! persistence adapter, and a [`Rejection`] when nothing changed.

use super::action::{Effect, GameRef, GameResult, Rejection, SessionId};
use super::rules;
use super::types::{Board, BoardSize, Cell, Line, Mark, Outcome};
use tracing::{debug, info, instrument};

/// Whether play has begun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Board configured, waiting for `start`.
    #[default]
    Setup,
    /// Game started; moves are accepted until the outcome is terminal.
    Playing,
}

/// Board, turn, move count and outcome of one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    turn: Mark,
    move_count: u32,
    outcome: Outcome,
    phase: Phase,
    game: GameRef,
    session_id: Option<SessionId>,
}

/// Result of applying one operation to a [`GameEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a transition carries the next engine state"]
pub struct Transition {
    engine: GameEngine,
    effects: Vec<Effect>,
    rejection: Option<Rejection>,
}

impl Transition {
    fn applied(engine: GameEngine, effects: Vec<Effect>) -> Self {
        Self {
            engine,
            effects,
            rejection: None,
        }
    }

    fn rejected(engine: GameEngine, rejection: Rejection) -> Self {
        debug!(%rejection, "Transition rejected");
        Self {
            engine,
            effects: Vec::new(),
            rejection: Some(rejection),
        }
    }

    /// The engine after the transition.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Effects emitted by the transition, in order.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Why the transition was a no-op, if it was.
    pub fn rejection(&self) -> Option<Rejection> {
        self.rejection
    }

    /// True if the engine changed.
    pub fn is_applied(&self) -> bool {
        self.rejection.is_none()
    }

    /// Discards effects and returns the engine.
    pub fn into_engine(self) -> GameEngine {
        self.engine
    }

    /// Splits into engine and effects.
    pub fn into_parts(self) -> (GameEngine, Vec<Effect>) {
        (self.engine, self.effects)
    }
}

impl GameEngine {
    /// Creates an engine in setup with a 3x3 board.
    #[instrument]
    pub fn new() -> Self {
        Self::with_size(BoardSize::default())
    }

    /// Creates an engine in setup with the given board size.
    #[instrument]
    pub fn with_size(size: BoardSize) -> Self {
        Self {
            board: Board::new(size),
            turn: Mark::X,
            move_count: 1,
            outcome: Outcome::InProgress,
            phase: Phase::Setup,
            game: GameRef::default(),
            session_id: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the board side length.
    pub fn size(&self) -> BoardSize {
        self.board.size()
    }

    /// Returns the mark that moves next.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Returns the 1-based number of the current move.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Returns the outcome so far.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the local handle of the current game.
    pub fn game(&self) -> GameRef {
        self.game
    }

    /// Returns the persistence session identifier, once known.
    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    /// Returns the completed line and its mark after a win.
    pub fn winning_line(&self) -> Option<(Mark, Line)> {
        match self.outcome {
            Outcome::Won(_) => rules::winning_line(&self.board),
            _ => None,
        }
    }

    /// Returns true if the UI should accept a click on `(row, col)`.
    pub fn accepts_move_at(&self, row: usize, col: usize) -> bool {
        self.phase == Phase::Playing && !self.outcome.is_terminal() && self.board.is_empty_at(row, col)
    }

    /// Sets the board size and clears the board.
    ///
    /// Ignored when `size` is outside 3..=15, or when the current game is in
    /// progress and already has marks on the board. A successful configure
    /// returns to [`Phase::Setup`] and drops the session identifier.
    #[instrument(skip(self), fields(current = %self.size()))]
    pub fn configure(self, size: usize) -> Transition {
        let size = match BoardSize::new(size) {
            Ok(size) => size,
            Err(_) => return Transition::rejected(self, Rejection::BoardSizeOutOfRange(size)),
        };

        if self.phase == Phase::Playing && !self.outcome.is_terminal() && self.board.occupied() > 0 {
            return Transition::rejected(self, Rejection::BoardSizeLocked);
        }

        info!(%size, "Board configured");
        Transition::applied(
            Self {
                game: self.game,
                ..Self::with_size(size)
            },
            Vec::new(),
        )
    }

    /// Starts a fresh game on the configured board.
    ///
    /// Emits [`Effect::CreateGame`] so the adapter can obtain a session
    /// identifier. Calling this during play restarts the game.
    #[instrument(skip(self), fields(size = %self.size()))]
    pub fn start(self) -> Transition {
        let game = self.game.next();
        let board_size = self.size();
        info!(%game, "Game started");

        Transition::applied(
            Self {
                phase: Phase::Playing,
                game,
                ..Self::with_size(board_size)
            },
            vec![Effect::CreateGame { game, board_size }],
        )
    }

    /// Places the current player's mark at `(row, col)`.
    ///
    /// Silently rejected when the game is not started or already over, when
    /// the cell is occupied, or when the coordinates are off the board.
    #[instrument(skip(self), fields(turn = %self.turn, move_count = self.move_count))]
    pub fn attempt_move(mut self, row: usize, col: usize) -> Transition {
        if self.phase != Phase::Playing {
            return Transition::rejected(self, Rejection::NotStarted);
        }
        if self.outcome.is_terminal() {
            return Transition::rejected(self, Rejection::GameOver);
        }
        match self.board.get(row, col) {
            None => return Transition::rejected(self, Rejection::OutOfBounds { row, col }),
            Some(Cell::Occupied(_)) => {
                return Transition::rejected(self, Rejection::CellOccupied { row, col });
            }
            Some(Cell::Empty) => {}
        }

        let player = self.turn;
        self.board.set(row, col, Cell::Occupied(player));
        let mut effects = vec![Effect::RecordMove {
            game: self.game,
            player,
            row,
            column: col,
            move_number: self.move_count,
        }];

        self.outcome = rules::evaluate(&self.board);
        match GameResult::from_outcome(self.outcome) {
            None => {
                self.turn = player.opponent();
                self.move_count += 1;
                debug!(next = %self.turn, move_count = self.move_count, "Move applied");
            }
            Some(result) => {
                info!(%result, moves = self.move_count, "Game over");
                effects.push(Effect::CompleteGame {
                    game: self.game,
                    result,
                });
                effects.push(Effect::RefreshStats);
            }
        }

        Transition::applied(self, effects)
    }

    /// Clears the board and returns to setup, keeping the board size.
    #[doc(alias = "new_game")]
    #[instrument(skip(self), fields(size = %self.size()))]
    pub fn reset(self) -> Transition {
        info!("Game reset");
        Transition::applied(
            Self {
                game: self.game,
                ..Self::with_size(self.size())
            },
            Vec::new(),
        )
    }

    /// Records the session identifier issued for `game`.
    ///
    /// Ignored when `game` is no longer the current game or play has not
    /// started.
    #[instrument(skip(self), fields(current = %self.game))]
    pub fn attach_session(mut self, game: GameRef, session_id: SessionId) -> Transition {
        if self.phase != Phase::Playing || game != self.game {
            return Transition::rejected(self, Rejection::StaleSession);
        }
        self.session_id = Some(session_id);
        debug!(%session_id, "Session attached");
        Transition::applied(self, Vec::new())
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(n: usize) -> GameEngine {
        GameEngine::new().configure(n).into_engine().start().into_engine()
    }

    #[test]
    fn test_moves_rejected_before_start() {
        let t = GameEngine::new().attempt_move(0, 0);
        assert_eq!(t.rejection(), Some(Rejection::NotStarted));
        assert_eq!(t.engine(), &GameEngine::new());
    }

    #[test]
    fn test_start_emits_create_game() {
        let t = GameEngine::new().configure(5).into_engine().start();
        assert_eq!(
            t.effects(),
            &[Effect::CreateGame {
                game: GameRef(1),
                board_size: BoardSize::new(5).unwrap(),
            }]
        );
        assert_eq!(t.engine().phase(), Phase::Playing);
    }

    #[test]
    fn test_move_emits_record_with_current_number() {
        let engine = started(3).attempt_move(1, 1).into_engine();
        let t = engine.attempt_move(0, 2);
        assert_eq!(
            t.effects(),
            &[Effect::RecordMove {
                game: GameRef(1),
                player: Mark::O,
                row: 0,
                column: 2,
                move_number: 2,
            }]
        );
    }

    #[test]
    fn test_configure_locked_after_first_move() {
        let engine = started(3).attempt_move(0, 0).into_engine();
        let t = engine.clone().configure(5);
        assert_eq!(t.rejection(), Some(Rejection::BoardSizeLocked));
        assert_eq!(t.engine(), &engine);
    }

    #[test]
    fn test_configure_allowed_before_first_move() {
        let t = started(3).configure(6);
        assert!(t.is_applied());
        assert_eq!(t.engine().size().get(), 6);
        assert_eq!(t.engine().phase(), Phase::Setup);
    }

    #[test]
    fn test_attach_session_ignores_stale_game() {
        let engine = started(3);
        let stale = engine.game();
        let engine = engine.start().into_engine();

        let t = engine.clone().attach_session(stale, SessionId(7));
        assert_eq!(t.rejection(), Some(Rejection::StaleSession));
        assert_eq!(t.engine().session_id(), None);

        let current = engine.game();
        let t = engine.attach_session(current, SessionId(8));
        assert_eq!(t.engine().session_id(), Some(SessionId(8)));
    }

    #[test]
    fn test_reset_drops_session_and_keeps_size() {
        let engine = started(7);
        let game = engine.game();
        let engine = engine.attach_session(game, SessionId(3)).into_engine();
        let engine = engine.attempt_move(2, 2).into_engine().reset().into_engine();
        assert_eq!(engine.session_id(), None);
        assert_eq!(engine.phase(), Phase::Setup);
        assert_eq!(engine.size().get(), 7);
        assert_eq!(engine.board().occupied(), 0);
    }
}
