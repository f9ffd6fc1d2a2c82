//! Match play - multiple games between two tiers
//!
//! Level 2 - Phase-level implementation

use connect4_core::{Difficulty, GameError};
use rayon::prelude::*;

use crate::config::ArenaConfig;
use crate::game_runner::{GameOutcome, GameRunner};

/// Result of a match, from the perspective of the two tiers passed to
/// [`play_match`] as `a` and `b`
#[derive(Clone, Debug)]
pub struct MatchResult {
    pub a: Difficulty,
    pub b: Difficulty,
    pub a_wins: u32,
    pub b_wins: u32,
    pub draws: u32,
    /// Average game length in moves
    pub avg_moves: f32,
    pub games_played: u32,
    /// Individual game outcomes
    pub outcomes: Vec<GameOutcome>,
}

impl MatchResult {
    /// Create empty result
    pub fn empty(a: Difficulty, b: Difficulty) -> Self {
        Self {
            a,
            b,
            a_wins: 0,
            b_wins: 0,
            draws: 0,
            avg_moves: 0.0,
            games_played: 0,
            outcomes: Vec::new(),
        }
    }

    /// Combine two results for the same pairing
    pub fn combine(&self, other: &MatchResult) -> MatchResult {
        let total_games = self.games_played + other.games_played;
        let avg_moves = if total_games > 0 {
            (self.avg_moves * self.games_played as f32 + other.avg_moves * other.games_played as f32)
                / total_games as f32
        } else {
            0.0
        };

        let mut outcomes = self.outcomes.clone();
        outcomes.extend(other.outcomes.iter().cloned());

        MatchResult {
            a: self.a,
            b: self.b,
            a_wins: self.a_wins + other.a_wins,
            b_wins: self.b_wins + other.b_wins,
            draws: self.draws + other.draws,
            avg_moves,
            games_played: total_games,
            outcomes,
        }
    }

    pub fn a_win_rate(&self) -> f32 {
        rate(self.a_wins, self.games_played)
    }

    pub fn b_win_rate(&self) -> f32 {
        rate(self.b_wins, self.games_played)
    }

    pub fn draw_rate(&self) -> f32 {
        rate(self.draws, self.games_played)
    }

    /// Wins = 1.0, Draws = 0.5, Losses = 0.0
    pub fn score_for_a(&self) -> f32 {
        self.a_wins as f32 + 0.5 * self.draws as f32
    }

    pub fn score_for_b(&self) -> f32 {
        self.b_wins as f32 + 0.5 * self.draws as f32
    }
}

fn rate(count: u32, games: u32) -> f32 {
    if games == 0 {
        0.0
    } else {
        count as f32 / games as f32
    }
}

/// Play a match between two tiers (Level 2 phase)
///
/// The opening move alternates each game; game `i` is seeded with
/// `base_seed + i`, so parallel and sequential runs agree.
pub fn play_match(a: Difficulty, b: Difficulty, config: &ArenaConfig) -> Result<MatchResult, GameError> {
    if config.games_per_match == 0 {
        return Ok(MatchResult::empty(a, b));
    }

    let schedule = prepare_schedule(config.games_per_match);
    let games = if config.parallel {
        schedule
            .par_iter()
            .map(|slot| Ok((slot.a_opens, play_scheduled_game(a, b, slot, config)?)))
            .collect::<Result<Vec<_>, GameError>>()?
    } else {
        schedule
            .iter()
            .map(|slot| Ok((slot.a_opens, play_scheduled_game(a, b, slot, config)?)))
            .collect::<Result<Vec<_>, GameError>>()?
    };

    let result = aggregate_results(a, b, games);
    tracing::info!(
        %a, %b,
        a_wins = result.a_wins,
        b_wins = result.b_wins,
        draws = result.draws,
        "match finished"
    );
    Ok(result)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// One game in a match
#[derive(Clone, Copy)]
struct ScheduledGame {
    /// Whether tier `a` opens this game
    a_opens: bool,
    /// Game index (for seeding)
    game_index: usize,
}

fn prepare_schedule(games: usize) -> Vec<ScheduledGame> {
    (0..games)
        .map(|i| ScheduledGame {
            a_opens: i % 2 == 0,
            game_index: i,
        })
        .collect()
}

fn play_scheduled_game(
    a: Difficulty,
    b: Difficulty,
    slot: &ScheduledGame,
    config: &ArenaConfig,
) -> Result<GameOutcome, GameError> {
    let seed = config.base_seed().wrapping_add(slot.game_index as u64);
    let mut runner = GameRunner::new(config.game.clone(), seed);

    if slot.a_opens {
        runner.play_game(a, b)
    } else {
        runner.play_game(b, a)
    }
}

/// Attribute each game to the tier that won it, whichever side it opened on.
///
/// Each outcome is paired with whether `a` opened, which stays unambiguous
/// when a tier plays itself.
fn aggregate_results(a: Difficulty, b: Difficulty, games: Vec<(bool, GameOutcome)>) -> MatchResult {
    let mut result = MatchResult::empty(a, b);
    let mut total_moves = 0usize;

    for (a_opened, outcome) in games {
        total_moves += outcome.moves.len();

        if outcome.is_draw() {
            result.draws += 1;
        } else if outcome.first_wins() == a_opened {
            result.a_wins += 1;
        } else {
            result.b_wins += 1;
        }
        result.outcomes.push(outcome);
    }

    result.games_played = result.outcomes.len() as u32;
    if result.games_played > 0 {
        result.avg_moves = total_moves as f32 / result.games_played as f32;
    }
    result
}
