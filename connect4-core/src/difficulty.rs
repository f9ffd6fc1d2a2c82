//! Difficulty tiers and the move-selection policy behind them

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::{SearchEngine, WIN_SCORE};
use crate::board::{Board, Side};
use crate::config::GameConfig;
use crate::eval::{evaluate, DirectionMask, Heuristics};
use crate::rules::is_win;

/// Directions the intermediate tier is allowed to "see" each move
pub const INTERMEDIATE_ENABLED_DIRECTIONS: usize = 2;

/// Computer opponent strength, weakest first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Intermediate,
    Hard,
    Impossible,
    Godmode,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Intermediate,
        Difficulty::Hard,
        Difficulty::Impossible,
        Difficulty::Godmode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Hard => "hard",
            Difficulty::Impossible => "impossible",
            Difficulty::Godmode => "godmode",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected easy, intermediate, hard, impossible or godmode)")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

/// How a tier picks its move
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Uniform choice among legal columns
    Random,
    /// One-ply greedy with a random subset of evaluation directions
    NoisyHeuristic { enabled_directions: usize },
    /// Full minimax to a fixed depth
    Search { depth: u32 },
}

/// Strategy per difficulty tier
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyTable {
    pub easy: Strategy,
    pub intermediate: Strategy,
    pub hard: Strategy,
    pub impossible: Strategy,
    pub godmode: Strategy,
}

impl Default for StrategyTable {
    fn default() -> Self {
        Self {
            easy: Strategy::Random,
            intermediate: Strategy::NoisyHeuristic {
                enabled_directions: INTERMEDIATE_ENABLED_DIRECTIONS,
            },
            hard: Strategy::Search { depth: 4 },
            impossible: Strategy::Search { depth: 6 },
            godmode: Strategy::Search { depth: 7 },
        }
    }
}

impl StrategyTable {
    pub fn strategy(&self, difficulty: Difficulty) -> &Strategy {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Intermediate => &self.intermediate,
            Difficulty::Hard => &self.hard,
            Difficulty::Impossible => &self.impossible,
            Difficulty::Godmode => &self.godmode,
        }
    }
}

/// One-ply greedy choice: an immediate win if there is one, otherwise the
/// column whose resulting position scores best under `mask`.
///
/// Columns are tried center-out and only a strictly better score replaces
/// the current pick.
pub fn pick_best_move(
    board: &Board,
    side: Side,
    heuristics: &Heuristics,
    mask: DirectionMask,
) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;

    for col in board.center_out_columns() {
        let Some(row) = board.next_open_row(col) else {
            continue;
        };
        let mut child = board.clone();
        child.drop_piece(row, col, side);

        let score = if is_win(&child, side) {
            WIN_SCORE
        } else {
            evaluate(&child, side, heuristics, mask)
        };

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((col, score));
        }
    }

    best.map(|(col, _)| col)
}

/// Maps a difficulty to a concrete move.
///
/// Owns the only source of randomness in move selection; seeding it makes
/// every tier reproducible.
pub struct DifficultyPolicy {
    strategies: StrategyTable,
    heuristics: Heuristics,
    rng: ChaCha8Rng,
}

impl DifficultyPolicy {
    pub fn new(strategies: StrategyTable, heuristics: Heuristics) -> Self {
        Self::with_seed(strategies, heuristics, 42)
    }

    pub fn with_seed(strategies: StrategyTable, heuristics: Heuristics, seed: u64) -> Self {
        Self {
            strategies,
            heuristics,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Policy for a configuration; `None` seeds from OS entropy
    pub fn from_config(config: &GameConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            strategies: config.strategies.clone(),
            heuristics: config.heuristics.clone(),
            rng,
        }
    }

    pub fn strategies(&self) -> &StrategyTable {
        &self.strategies
    }

    pub fn heuristics(&self) -> &Heuristics {
        &self.heuristics
    }

    /// Pick a column for `side`, `None` only when the board has no legal column
    pub fn choose_move(&mut self, difficulty: Difficulty, board: &Board, side: Side) -> Option<usize> {
        let strategy = self.strategies.strategy(difficulty).clone();

        let column = match strategy {
            Strategy::Random => {
                let legal: Vec<usize> = board.valid_columns().collect();
                legal.choose(&mut self.rng).copied()
            }
            Strategy::NoisyHeuristic { enabled_directions } => {
                let mask = DirectionMask::random(&mut self.rng, enabled_directions);
                pick_best_move(board, side, &self.heuristics, mask)
            }
            Strategy::Search { depth } => {
                let mut engine = SearchEngine::new(self.heuristics.clone(), side);
                engine.search(board, depth.max(1)).map(|result| result.column)
            }
        };

        tracing::debug!(%difficulty, %side, ?strategy, ?column, "chose move");
        column
    }
}
