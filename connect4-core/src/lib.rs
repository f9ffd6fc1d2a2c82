//! Connect Four Core - Game engine and AI
//!
//! This crate provides the core game logic for Connect Four:
//! - Board geometry (gravity grid, sides, 4-cell windows)
//! - Rules (win, draw and terminal classification)
//! - Position evaluation with windowed pattern counting
//! - CPU-based minimax AI with alpha-beta pruning
//! - Difficulty tiers mapping to move-selection strategies
//! - Game session state machine

pub mod board;
pub mod rules;
pub mod eval;
pub mod ai;
pub mod difficulty;
pub mod config;
pub mod game;

// Re-exports for convenient access
pub use board::{Board, Cell, Direction, Side, Window, DEFAULT_COLS, DEFAULT_ROWS, SERIES_LEN};
pub use rules::{classify, is_draw, is_win, TerminalStatus};
pub use eval::{evaluate, DirectionMask, Heuristics};
pub use ai::{SearchEngine, SearchResult, WIN_SCORE};
pub use difficulty::{pick_best_move, Difficulty, DifficultyPolicy, Strategy, StrategyTable};
pub use config::{ConfigError, GameConfig};
pub use game::{GameError, GameMode, GameSession, MoveOutcome, Phase, Seat};
