//! Position evaluation

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::WIN_SCORE;
use crate::board::{Board, Direction, Side, Window, SERIES_LEN};
use crate::config::ConfigError;

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Four of our pieces in a window
    pub four_in_row: i32,
    /// Three of ours plus one empty cell
    pub three_open: i32,
    /// Two of ours plus two empty cells
    pub two_open: i32,
    /// Penalty for three opponent pieces plus one empty cell
    pub opp_three_open: i32,
    /// Bonus per own piece in the center column
    pub center_weight: i32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            four_in_row: 10_000,
            three_open: 5,
            two_open: 2,
            opp_three_open: 6,
            center_weight: 3,
        }
    }
}

impl Heuristics {
    /// Blocking an opponent three must weigh at least as much as building our own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.opp_three_open < self.three_open {
            return Err(ConfigError::WeakDefence {
                defence: self.opp_three_open,
                offence: self.three_open,
            });
        }
        Ok(())
    }

    /// [`Heuristics::validate`] plus a bound for a `rows x cols` board: the
    /// largest possible evaluation must stay below [`WIN_SCORE`] so decided
    /// games always outrank heuristic leaves.
    pub fn validate_for_board(&self, rows: usize, cols: usize) -> Result<(), ConfigError> {
        self.validate()?;
        let bound = self.max_abs_score(rows, cols);
        if bound >= i64::from(WIN_SCORE) {
            return Err(ConfigError::WeightsTooLarge {
                bound,
                limit: WIN_SCORE,
            });
        }
        Ok(())
    }

    /// Upper bound on `|evaluate(..)|` for an undecided position on a
    /// `rows x cols` board. Search and the greedy tier never evaluate a board
    /// holding four in a row, so `four_in_row` is left out.
    pub fn max_abs_score(&self, rows: usize, cols: usize) -> i64 {
        let max_weight = [self.three_open, self.two_open, self.opp_three_open]
            .into_iter()
            .map(|w| i64::from(w).abs())
            .max()
            .unwrap_or(0);
        let windows = window_count(rows, cols) as i64;
        let center = i64::from(self.center_weight).abs() * rows as i64;
        windows.saturating_mul(max_weight).saturating_add(center)
    }
}

/// Number of windows on a `rows x cols` board, all directions
fn window_count(rows: usize, cols: usize) -> usize {
    let span = SERIES_LEN - 1;
    let long_rows = rows.saturating_sub(span);
    let long_cols = cols.saturating_sub(span);
    rows * long_cols + long_rows * cols + 2 * long_rows * long_cols
}

/// Which scanning directions contribute to the evaluation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectionMask([bool; 4]);

impl Default for DirectionMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl DirectionMask {
    pub const ALL: DirectionMask = DirectionMask([true; 4]);
    pub const NONE: DirectionMask = DirectionMask([false; 4]);

    pub fn from_directions(directions: &[Direction]) -> Self {
        let mut mask = Self::NONE;
        for &direction in directions {
            mask.0[direction.index()] = true;
        }
        mask
    }

    /// Mask with exactly `enabled` directions chosen uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R, enabled: usize) -> Self {
        let amount = enabled.min(Direction::ALL.len());
        let mut mask = Self::NONE;
        for index in rand::seq::index::sample(rng, Direction::ALL.len(), amount) {
            mask.0[index] = true;
        }
        mask
    }

    pub fn is_enabled(&self, direction: Direction) -> bool {
        self.0[direction.index()]
    }

    pub fn enabled_count(&self) -> usize {
        self.0.iter().filter(|&&on| on).count()
    }
}

/// Piece counts inside one window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct WindowCounts {
    own: usize,
    opp: usize,
    empty: usize,
}

fn count_window(board: &Board, window: &Window, side: Side) -> WindowCounts {
    let mut counts = WindowCounts { own: 0, opp: 0, empty: 0 };
    for &(row, col) in &window.cells {
        match board.cell(row, col).side() {
            Some(owner) if owner == side => counts.own += 1,
            Some(_) => counts.opp += 1,
            None => counts.empty += 1,
        }
    }
    counts
}

fn score_window(counts: WindowCounts, heuristics: &Heuristics) -> i32 {
    match (counts.own, counts.opp, counts.empty) {
        (4, _, _) => heuristics.four_in_row,
        (3, 0, 1) => heuristics.three_open,
        (2, 0, 2) => heuristics.two_open,
        (0, 3, 1) => 0i32.saturating_sub(heuristics.opp_three_open),
        _ => 0,
    }
}

/// Evaluate position from `side`'s perspective.
///
/// Only windows whose direction is enabled in `mask` are counted; the center
/// column bonus always applies. The result is clamped strictly inside
/// `±WIN_SCORE`, so any weights rank below a decided game.
pub fn evaluate(board: &Board, side: Side, heuristics: &Heuristics, mask: DirectionMask) -> i32 {
    let own = side.piece();

    let mut score = 0i32;
    if board.cols() > 0 {
        let center = board.center_column();
        let center_pieces = (0..board.rows())
            .filter(|&row| board.cell(row, center) == own)
            .count() as i32;
        score = center_pieces.saturating_mul(heuristics.center_weight);
    }

    for window in board.windows() {
        if !mask.is_enabled(window.direction) {
            continue;
        }
        score = score.saturating_add(score_window(count_window(board, &window, side), heuristics));
    }

    score.clamp(-(WIN_SCORE - 1), WIN_SCORE - 1)
}
