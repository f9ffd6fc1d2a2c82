//! Match command - AI-vs-AI games between two tiers
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match() from the arena, report_results()
//! - Level 3: print_json_results(), print_text_results()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;

use connect4_core::{Difficulty, GameConfig, TerminalStatus};
use connect4_tournament::{play_match, ArenaConfig, GameOutcome, MatchResult};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// First tier
    #[arg(long, default_value = "hard")]
    pub first: Difficulty,

    /// Second tier
    #[arg(long, default_value = "intermediate")]
    pub second: Difficulty,

    /// Number of games to play (the opening move alternates)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Play games one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Build the arena configuration
/// 2. Play the match
/// 3. Report results
pub fn run(args: MatchArgs, config: GameConfig, seed: Option<u64>) -> Result<()> {
    let arena = arena_config(&args, config, seed);

    tracing::info!(
        "Starting match: {} vs {} ({} games)",
        args.first,
        args.second,
        args.games
    );

    let result = play_match(args.first, args.second, &arena)?;
    report_results(&result, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn arena_config(args: &MatchArgs, config: GameConfig, seed: Option<u64>) -> ArenaConfig {
    let mut arena = ArenaConfig::new(args.games).with_game(config);
    if let Some(seed) = seed {
        arena = arena.with_seed(seed);
    }
    if args.sequential {
        arena = arena.sequential();
    }
    arena
}

fn report_results(result: &MatchResult, args: &MatchArgs) {
    if args.json {
        print_json_results(result);
    } else {
        print_text_results(result);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Print results as JSON
fn print_json_results(result: &MatchResult) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        first: Difficulty,
        second: Difficulty,
        winner: Option<Difficulty>,
        status: TerminalStatus,
        moves: Vec<usize>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        a: Difficulty,
        b: Difficulty,
        total_games: u32,
        a_wins: u32,
        b_wins: u32,
        draws: u32,
        avg_moves: f32,
        a_win_rate: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        a: result.a,
        b: result.b,
        total_games: result.games_played,
        a_wins: result.a_wins,
        b_wins: result.b_wins,
        draws: result.draws,
        avg_moves: result.avg_moves,
        a_win_rate: result.a_win_rate(),
        games: result
            .outcomes
            .iter()
            .enumerate()
            .map(|(i, g)| JsonGame {
                game_number: i + 1,
                first: g.first,
                second: g.second,
                winner: g.winner_tier(),
                status: g.status,
                moves: g.moves.clone(),
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(result: &MatchResult) {
    let total = result.games_played;

    println!("\n=== Match Results: {} vs {} ===", result.a, result.b);
    for (i, game) in result.outcomes.iter().enumerate() {
        println!("Game {:>3}: {}", i + 1, describe_game(game));
    }

    println!("\nTotal games: {}", total);
    println!("{:<13} {} ({:.1}%)", format!("{} wins:", result.a), result.a_wins, result.a_win_rate() * 100.0);
    println!("{:<13} {} ({:.1}%)", format!("{} wins:", result.b), result.b_wins, result.b_win_rate() * 100.0);
    println!("{:<13} {} ({:.1}%)", "Draws:", result.draws, result.draw_rate() * 100.0);
    println!("Avg moves:    {:.1}", result.avg_moves);
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn describe_game(game: &GameOutcome) -> String {
    let opening = format!("{} (opens) vs {}", game.first, game.second);
    match game.winner_tier() {
        Some(winner) => format!("{:<32} {} wins in {} moves", opening, winner, game.moves.len()),
        None => format!("{:<32} draw after {} moves", opening, game.moves.len()),
    }
}
