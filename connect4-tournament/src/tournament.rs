//! Ladder execution - round-robin between difficulty tiers
//!
//! Level 1 - Orchestration and Level 2 - Phases

use connect4_core::{Difficulty, GameError};
use rayon::prelude::*;

use crate::config::ArenaConfig;
use crate::match_play::{play_match, MatchResult};

/// Standing of a tier in the ladder
#[derive(Clone, Debug)]
pub struct Standing {
    pub tier: Difficulty,
    /// Total score (wins + 0.5 * draws)
    pub score: f32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games_played: u32,
    /// Average game length in moves
    pub avg_moves: f32,
    /// Sum of opponents' scores, for tiebreaking
    pub buchholz: f32,
}

impl Standing {
    pub fn win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f32 / self.games_played as f32
        }
    }

    /// Normalized score (0.0 to 1.0)
    pub fn normalized_score(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.score / self.games_played as f32
        }
    }
}

/// Result of a ladder
#[derive(Clone, Debug)]
pub struct LadderResult {
    /// Final standings sorted by score (descending)
    pub standings: Vec<Standing>,
    /// Every match played, in pairing order
    pub matches: Vec<MatchResult>,
}

impl LadderResult {
    /// Top standing
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }

    pub fn standing_for(&self, tier: Difficulty) -> Option<&Standing> {
        self.standings.iter().find(|s| s.tier == tier)
    }
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run a round-robin ladder: every tier plays every other tier once
pub fn run_ladder(tiers: &[Difficulty], config: &ArenaConfig) -> Result<LadderResult, GameError> {
    let pairings = generate_pairings(tiers.len());
    tracing::info!(tiers = tiers.len(), matches = pairings.len(), "starting ladder");

    let matches = execute_all_matches(tiers, &pairings, config)?;
    let standings = compute_standings(tiers, &matches);

    Ok(LadderResult { standings, matches })
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Generate all pairings for round-robin
fn generate_pairings(n: usize) -> Vec<(usize, usize)> {
    let mut pairings = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            pairings.push((i, j));
        }
    }
    pairings
}

fn execute_all_matches(
    tiers: &[Difficulty],
    pairings: &[(usize, usize)],
    config: &ArenaConfig,
) -> Result<Vec<MatchResult>, GameError> {
    if config.parallel {
        pairings
            .par_iter()
            .map(|&(i, j)| play_match(tiers[i], tiers[j], config))
            .collect()
    } else {
        pairings
            .iter()
            .map(|&(i, j)| play_match(tiers[i], tiers[j], config))
            .collect()
    }
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Compute final standings from match results
fn compute_standings(tiers: &[Difficulty], matches: &[MatchResult]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = tiers
        .iter()
        .map(|&tier| {
            let mut standing = Standing {
                tier,
                score: 0.0,
                wins: 0,
                losses: 0,
                draws: 0,
                games_played: 0,
                avg_moves: 0.0,
                buchholz: 0.0,
            };
            let mut total_moves = 0.0f32;

            for result in matches {
                let (wins, losses) = if result.a == tier {
                    (result.a_wins, result.b_wins)
                } else if result.b == tier {
                    (result.b_wins, result.a_wins)
                } else {
                    continue;
                };
                standing.wins += wins;
                standing.losses += losses;
                standing.draws += result.draws;
                standing.games_played += result.games_played;
                total_moves += result.avg_moves * result.games_played as f32;
            }

            standing.score = standing.wins as f32 + 0.5 * standing.draws as f32;
            if standing.games_played > 0 {
                standing.avg_moves = total_moves / standing.games_played as f32;
            }
            standing
        })
        .collect();

    let scores: Vec<(Difficulty, f32)> = standings.iter().map(|s| (s.tier, s.score)).collect();
    for standing in &mut standings {
        standing.buchholz = compute_buchholz(standing.tier, matches, &scores);
    }

    // Sort by score (descending), then Buchholz (descending); stable for ties
    standings.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.buchholz
                    .partial_cmp(&a.buchholz)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    standings
}

/// Sum of the scores of every tier `tier` met
fn compute_buchholz(tier: Difficulty, matches: &[MatchResult], scores: &[(Difficulty, f32)]) -> f32 {
    matches
        .iter()
        .filter_map(|m| {
            if m.a == tier {
                Some(m.b)
            } else if m.b == tier {
                Some(m.a)
            } else {
                None
            }
        })
        .filter_map(|opponent| scores.iter().find(|(t, _)| *t == opponent).map(|(_, s)| *s))
        .sum()
}
