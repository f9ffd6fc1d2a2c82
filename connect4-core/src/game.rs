//! Game session state machine

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Side};
use crate::config::GameConfig;
use crate::difficulty::{Difficulty, DifficultyPolicy};
use crate::rules::{classify, TerminalStatus};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Who sits on each side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    HumanVsHuman,
    /// Human plays `Side::Player`, the computer `Side::Ai`
    HumanVsAi(Difficulty),
    /// `first` plays `Side::Ai` (which opens), `second` plays `Side::Player`
    AiVsAi { first: Difficulty, second: Difficulty },
}

impl GameMode {
    pub fn seat(self, side: Side) -> Seat {
        match (self, side) {
            (GameMode::HumanVsHuman, _) => Seat::Human,
            (GameMode::HumanVsAi(_), Side::Player) => Seat::Human,
            (GameMode::HumanVsAi(difficulty), Side::Ai) => Seat::Computer(difficulty),
            (GameMode::AiVsAi { first, .. }, Side::Ai) => Seat::Computer(first),
            (GameMode::AiVsAi { second, .. }, Side::Player) => Seat::Computer(second),
        }
    }

    pub fn opening_side(self) -> Side {
        match self {
            GameMode::AiVsAi { .. } => Side::Ai,
            _ => Side::Player,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    Human,
    Computer(Difficulty),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    InProgress,
    GameOver(TerminalStatus),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("column {column} is out of range (board has {cols} columns)")]
    ColumnOutOfRange { column: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("game is not in progress")]
    NotInProgress,

    #[error("game has already started")]
    AlreadyStarted,

    #[error("it is the computer's turn ({0})")]
    NotHumanTurn(Side),

    #[error("it is a human's turn ({0})")]
    NotComputerTurn(Side),

    #[error("no legal moves left")]
    NoLegalMoves,
}

/// Record of one applied move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub side: Side,
    pub column: usize,
    pub row: usize,
    pub status: TerminalStatus,
}

// ============================================================================
// SESSION
// ============================================================================

/// A single game from setup to game over.
///
/// Every move goes through the same path: validate the column, drop the
/// piece, classify the board, then either end the game or pass the turn.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    mode: Option<GameMode>,
    phase: Phase,
    turn: Side,
    history: Vec<MoveOutcome>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let board = config.new_board();
        let turn = config.first_turn.unwrap_or(Side::Player);
        Self {
            config,
            board,
            mode: None,
            phase: Phase::Setup,
            turn,
            history: Vec::new(),
        }
    }

    /// Leave setup and begin play
    pub fn start(&mut self, mode: GameMode) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::AlreadyStarted);
        }
        self.mode = Some(mode);
        self.turn = self.config.first_turn.unwrap_or_else(|| mode.opening_side());
        self.phase = Phase::InProgress;

        tracing::debug!(?mode, turn = %self.turn, "game started");
        Ok(())
    }

    /// Back to setup with a fresh board
    pub fn restart(&mut self) {
        self.board = self.config.new_board();
        self.mode = None;
        self.phase = Phase::Setup;
        self.turn = self.config.first_turn.unwrap_or(Side::Player);
        self.history.clear();
    }

    /// Human move in `column` (0-based)
    pub fn play(&mut self, column: usize) -> Result<MoveOutcome, GameError> {
        let mode = self.active_mode()?;
        if let Seat::Computer(_) = mode.seat(self.turn) {
            return Err(GameError::NotHumanTurn(self.turn));
        }
        self.apply(column)
    }

    /// Let the computer on the current seat move
    pub fn ai_move(&mut self, policy: &mut DifficultyPolicy) -> Result<MoveOutcome, GameError> {
        let mode = self.active_mode()?;
        let Seat::Computer(difficulty) = mode.seat(self.turn) else {
            return Err(GameError::NotComputerTurn(self.turn));
        };

        let column = policy
            .choose_move(difficulty, &self.board, self.turn)
            .ok_or(GameError::NoLegalMoves)?;
        self.apply(column)
    }

    fn active_mode(&self) -> Result<GameMode, GameError> {
        match (self.phase, self.mode) {
            (Phase::InProgress, Some(mode)) => Ok(mode),
            _ => Err(GameError::NotInProgress),
        }
    }

    fn apply(&mut self, column: usize) -> Result<MoveOutcome, GameError> {
        if column >= self.board.cols() {
            return Err(GameError::ColumnOutOfRange {
                column,
                cols: self.board.cols(),
            });
        }
        let row = self
            .board
            .next_open_row(column)
            .ok_or(GameError::ColumnFull(column))?;

        let side = self.turn;
        self.board.drop_piece(row, column, side);
        let status = classify(&self.board, side);

        let outcome = MoveOutcome {
            side,
            column,
            row,
            status,
        };
        self.history.push(outcome);

        if status.is_terminal() {
            tracing::debug!(?status, moves = self.history.len(), "game over");
            self.phase = Phase::GameOver(status);
        } else {
            self.turn = side.opponent();
        }

        Ok(outcome)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side to move (or the side that made the final move once over)
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn history(&self) -> &[MoveOutcome] {
        &self.history
    }

    /// Seat of the side to move, `None` outside of play
    pub fn seat_to_move(&self) -> Option<Seat> {
        self.active_mode().ok().map(|mode| mode.seat(self.turn))
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    pub fn status(&self) -> TerminalStatus {
        match self.phase {
            Phase::GameOver(status) => status,
            _ => TerminalStatus::InProgress,
        }
    }
}
