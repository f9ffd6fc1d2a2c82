//! Ladder command - round-robin between difficulty tiers

use anyhow::{bail, Result};
use clap::Args;

use connect4_core::{Difficulty, GameConfig};
use connect4_tournament::{run_ladder, ArenaConfig, LadderResult};

#[derive(Args)]
pub struct LadderArgs {
    /// Tiers to include, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    pub tiers: Vec<Difficulty>,

    /// Games per pairing
    #[arg(long, default_value = "4")]
    pub games: usize,

    /// Play games one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output standings as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run ladder command
pub fn run(args: LadderArgs, config: GameConfig, seed: Option<u64>) -> Result<()> {
    let tiers = selected_tiers(&args.tiers);
    if tiers.len() < 2 {
        bail!("a ladder needs at least two distinct tiers");
    }

    let mut arena = ArenaConfig::new(args.games).with_game(config);
    if let Some(seed) = seed {
        arena = arena.with_seed(seed);
    }
    if args.sequential {
        arena = arena.sequential();
    }

    let ladder = run_ladder(&tiers, &arena)?;

    if args.json {
        print_json_results(&ladder);
    } else {
        print_text_results(&ladder);
    }
    Ok(())
}

/// Requested tiers without duplicates, in ladder order
fn selected_tiers(requested: &[Difficulty]) -> Vec<Difficulty> {
    if requested.is_empty() {
        return Difficulty::ALL.to_vec();
    }
    let mut tiers = requested.to_vec();
    tiers.sort();
    tiers.dedup();
    tiers
}

fn print_json_results(ladder: &LadderResult) {
    #[derive(serde::Serialize)]
    struct JsonStanding {
        rank: usize,
        tier: Difficulty,
        score: f32,
        wins: u32,
        losses: u32,
        draws: u32,
        games_played: u32,
        avg_moves: f32,
    }

    let standings: Vec<JsonStanding> = ladder
        .standings
        .iter()
        .enumerate()
        .map(|(i, s)| JsonStanding {
            rank: i + 1,
            tier: s.tier,
            score: s.score,
            wins: s.wins,
            losses: s.losses,
            draws: s.draws,
            games_played: s.games_played,
            avg_moves: s.avg_moves,
        })
        .collect();

    if let Ok(json) = serde_json::to_string_pretty(&standings) {
        println!("{}", json);
    }
}

fn print_text_results(ladder: &LadderResult) {
    println!("\n=== Ladder Standings ===");
    println!(
        "{:<5} {:<13} {:>6} {:>5} {:>5} {:>5} {:>9}",
        "Rank", "Tier", "Score", "W", "L", "D", "Avg moves"
    );
    println!("{}", "-".repeat(54));

    for (i, s) in ladder.standings.iter().enumerate() {
        println!(
            "{:<5} {:<13} {:>6.1} {:>5} {:>5} {:>5} {:>9.1}",
            i + 1,
            s.tier.to_string(),
            s.score,
            s.wins,
            s.losses,
            s.draws,
            s.avg_moves
        );
    }

    println!("\nMatches:");
    for m in &ladder.matches {
        println!(
            "  {:<13} {:>2} - {:<2} {:<13} ({} draws)",
            m.a.to_string(),
            m.a_wins,
            m.b_wins,
            m.b.to_string(),
            m.draws
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_tiers() {
        assert_eq!(selected_tiers(&[]), Difficulty::ALL.to_vec());
        assert_eq!(
            selected_tiers(&[Difficulty::Hard, Difficulty::Easy, Difficulty::Hard]),
            vec![Difficulty::Easy, Difficulty::Hard]
        );
    }
}
