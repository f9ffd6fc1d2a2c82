//! Game configuration
//!
//! Board size, opening side, difficulty strategies and evaluation weights,
//! loadable from JSON. Every field has a default, so a partial file (or `{}`)
//! is a valid configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Side, DEFAULT_COLS, DEFAULT_ROWS, SERIES_LEN};
use crate::difficulty::{Difficulty, Strategy, StrategyTable};
use crate::eval::Heuristics;

/// Reasons a configuration is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must have at least one row and one column (got {rows}x{cols})")]
    EmptyBoard { rows: usize, cols: usize },

    #[error("a {rows}x{cols} board cannot hold four in a row in any direction")]
    BoardTooSmall { rows: usize, cols: usize },

    #[error("search depth for {difficulty} must be at least 1")]
    InvalidDepth { difficulty: Difficulty },

    #[error("opponent-three penalty {defence} is below own-three reward {offence}")]
    WeakDefence { defence: i32, offence: i32 },

    #[error("heuristic weights can reach {bound}, must stay below the decided-game score {limit}")]
    WeightsTooLarge { bound: i64, limit: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Side that opens; `None` lets the game mode decide
    pub first_turn: Option<Side>,
    pub strategies: StrategyTable,
    pub heuristics: Heuristics,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            first_turn: None,
            strategies: StrategyTable::default(),
            heuristics: Heuristics::default(),
        }
    }
}

impl GameConfig {
    /// Load and validate a configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.rows < SERIES_LEN && self.cols < SERIES_LEN {
            return Err(ConfigError::BoardTooSmall {
                rows: self.rows,
                cols: self.cols,
            });
        }

        for difficulty in Difficulty::ALL {
            if let Strategy::Search { depth: 0 } = self.strategies.strategy(difficulty) {
                return Err(ConfigError::InvalidDepth { difficulty });
            }
        }

        self.heuristics.validate_for_board(self.rows, self.cols)
    }

    /// Fresh empty board with the configured dimensions
    pub fn new_board(&self) -> Board {
        Board::new(self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        let board = config.new_board();
        assert_eq!((board.rows(), board.cols()), (6, 7));
    }

    #[test]
    fn test_board_size_validation() {
        let empty = GameConfig {
            rows: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            empty.validate(),
            Err(ConfigError::EmptyBoard { rows: 0, cols: 7 })
        );

        let tiny = GameConfig {
            rows: 3,
            cols: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            tiny.validate(),
            Err(ConfigError::BoardTooSmall { rows: 3, cols: 3 })
        );

        // A single long row can still hold a horizontal four
        let strip = GameConfig {
            rows: 1,
            cols: 5,
            ..GameConfig::default()
        };
        assert!(strip.validate().is_ok());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let mut config = GameConfig::default();
        config.strategies.hard = Strategy::Search { depth: 0 };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDepth {
                difficulty: Difficulty::Hard
            })
        );
    }

    #[test]
    fn test_oversized_weights_rejected() {
        let config: GameConfig = serde_json::from_str(
            r#"{"heuristics": {"three_open": 2000000000, "opp_three_open": 2000000000}}"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WeightsTooLarge { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"rows": 8, "first_turn": "ai"}"#).unwrap();
        assert_eq!(config.rows, 8);
        assert_eq!(config.cols, DEFAULT_COLS);
        assert_eq!(config.first_turn, Some(Side::Ai));
        assert_eq!(config.heuristics, Heuristics::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("connect4-config-{}.json", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(
                file,
                r#"{{"cols": 9, "strategies": {{"hard": {{"kind": "search", "depth": 3}}}}}}"#
            )
            .unwrap();
        }

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.cols, 9);
        assert_eq!(config.strategies.hard, Strategy::Search { depth: 3 });
        std::fs::remove_file(&path).unwrap();

        assert!(GameConfig::load(dir.join("does-not-exist.json")).is_err());
    }
}
