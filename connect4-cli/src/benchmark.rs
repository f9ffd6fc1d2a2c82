//! Benchmark command - search cost per depth, with and without pruning
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_search_benchmarks(), run_tier_benchmarks(), report_results()
//! - Level 3: benchmark_search(), benchmark_tier()
//! - Level 4: position generation, timing utilities, formatting

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use connect4_core::{classify, Board, Difficulty, DifficultyPolicy, GameConfig, SearchEngine, Side, TerminalStatus};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Maximum search depth to test
    #[arg(long, default_value = "6")]
    pub depth: u32,

    /// Number of random positions to search
    #[arg(long, default_value = "5")]
    pub positions: usize,

    /// Random plies played to reach each position
    #[arg(long, default_value = "8")]
    pub plies: usize,

    /// Skip plain minimax (slow beyond depth 6)
    #[arg(long)]
    pub pruned_only: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Results of a single benchmark run
#[derive(Clone, Debug)]
struct BenchmarkResult {
    name: String,
    searches: usize,
    total_time: Duration,
    avg_time: Duration,
    nodes: u64,
    notes: String,
}

/// All benchmark results
#[derive(Clone, Debug)]
struct AllResults {
    results: Vec<BenchmarkResult>,
    system_info: String,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
///
/// 1. Generate reproducible positions
/// 2. Time pruned and plain search at each depth
/// 3. Time every difficulty tier
/// 4. Report all results
pub fn run(args: BenchmarkArgs, config: GameConfig, seed: Option<u64>) -> Result<()> {
    config.validate()?;
    tracing::info!(
        "Starting benchmarks: {} positions, max depth {}",
        args.positions,
        args.depth
    );

    let mut rng = create_rng(seed);
    let positions: Vec<(Board, Side)> = (0..args.positions)
        .map(|_| random_position(&config, args.plies, &mut rng))
        .collect();

    let mut all_results = AllResults {
        results: Vec::new(),
        system_info: get_system_info(),
    };

    run_search_benchmarks(&args, &config, &positions, &mut all_results);
    run_tier_benchmarks(&config, &positions, seed, &mut all_results);

    report_results(&all_results, &args);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn run_search_benchmarks(
    args: &BenchmarkArgs,
    config: &GameConfig,
    positions: &[(Board, Side)],
    results: &mut AllResults,
) {
    for depth in 1..=args.depth {
        tracing::info!("Benchmarking search at depth {}...", depth);
        let pruned = benchmark_search(config, positions, depth, true);

        if !args.pruned_only {
            let plain = benchmark_search(config, positions, depth, false);
            let agree = pruned.chosen == plain.chosen;
            let mut pruned_result = pruned.result;
            pruned_result.notes = format!(
                "{:.1}x fewer nodes, same moves: {}",
                plain.result.nodes as f64 / pruned_result.nodes.max(1) as f64,
                agree
            );
            results.results.push(pruned_result);
            results.results.push(plain.result);
        } else {
            results.results.push(pruned.result);
        }
    }
}

fn run_tier_benchmarks(
    config: &GameConfig,
    positions: &[(Board, Side)],
    seed: Option<u64>,
    results: &mut AllResults,
) {
    for difficulty in Difficulty::ALL {
        tracing::info!("Benchmarking tier {}...", difficulty);
        results
            .results
            .push(benchmark_tier(config, positions, difficulty, seed));
    }
}

/// Report all benchmark results
fn report_results(results: &AllResults, args: &BenchmarkArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

struct SearchRun {
    result: BenchmarkResult,
    chosen: Vec<Option<usize>>,
}

/// Search every position at one depth
fn benchmark_search(config: &GameConfig, positions: &[(Board, Side)], depth: u32, pruning: bool) -> SearchRun {
    let mut nodes = 0u64;
    let mut chosen = Vec::with_capacity(positions.len());

    let start = Instant::now();
    for (board, side) in positions {
        let mut engine = if pruning {
            SearchEngine::new(config.heuristics.clone(), *side)
        } else {
            SearchEngine::without_pruning(config.heuristics.clone(), *side)
        };
        chosen.push(engine.search(board, depth).map(|r| r.column));
        nodes += engine.nodes();
    }
    let total_time = start.elapsed();

    SearchRun {
        result: BenchmarkResult {
            name: format!("{} D{}", if pruning { "Alpha-Beta" } else { "Minimax" }, depth),
            searches: positions.len(),
            total_time,
            avg_time: average(total_time, positions.len()),
            nodes,
            notes: String::new(),
        },
        chosen,
    }
}

/// Time one tier's move choice on every position
fn benchmark_tier(
    config: &GameConfig,
    positions: &[(Board, Side)],
    difficulty: Difficulty,
    seed: Option<u64>,
) -> BenchmarkResult {
    let mut policy = DifficultyPolicy::from_config(config, seed);
    let start = Instant::now();
    let moved = positions
        .iter()
        .filter(|(board, side)| policy.choose_move(difficulty, board, *side).is_some())
        .count();
    let total_time = start.elapsed();

    BenchmarkResult {
        name: format!("Tier {}", difficulty),
        searches: positions.len(),
        total_time,
        avg_time: average(total_time, positions.len()),
        nodes: 0,
        notes: format!("{:?}, moved in {}/{}", config.strategies.strategy(difficulty), moved, positions.len()),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Random position reached without either side winning; returns the side to move
fn random_position(config: &GameConfig, plies: usize, rng: &mut ChaCha8Rng) -> (Board, Side) {
    'retry: loop {
        let mut board = config.new_board();
        let mut side = Side::Player;
        for _ in 0..plies {
            let legal: Vec<usize> = board.valid_columns().collect();
            if legal.is_empty() {
                break;
            }
            let col = legal[rng.gen_range(0..legal.len())];
            if let Some(row) = board.next_open_row(col) {
                board.drop_piece(row, col, side);
            }
            if classify(&board, side) != TerminalStatus::InProgress {
                continue 'retry;
            }
            side = side.opponent();
        }
        return (board, side);
    }
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn average(total: Duration, count: usize) -> Duration {
    if count == 0 {
        Duration::ZERO
    } else {
        total / count as u32
    }
}

/// Get system information string
fn get_system_info() -> String {
    format!(
        "connect4 {}, {} CPUs",
        env!("CARGO_PKG_VERSION"),
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1)
    )
}

/// Format duration for display
fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() >= 1 {
        format!("{:.1}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.1}us", d.as_secs_f64() * 1_000_000.0)
    }
}

/// Print results as JSON
fn print_json_results(results: &AllResults) {
    #[derive(serde::Serialize)]
    struct JsonBenchmark {
        name: String,
        searches: usize,
        total_time_ms: f64,
        avg_time_ms: f64,
        nodes: u64,
        notes: String,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        system_info: String,
        benchmarks: Vec<JsonBenchmark>,
    }

    let output = JsonOutput {
        system_info: results.system_info.clone(),
        benchmarks: results
            .results
            .iter()
            .map(|r| JsonBenchmark {
                name: r.name.clone(),
                searches: r.searches,
                total_time_ms: r.total_time.as_secs_f64() * 1000.0,
                avg_time_ms: r.avg_time.as_secs_f64() * 1000.0,
                nodes: r.nodes,
                notes: r.notes.clone(),
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text table
fn print_text_results(results: &AllResults) {
    println!("\n=== Connect Four Benchmark Results ===");
    println!("System: {}\n", results.system_info);

    println!(
        "{:<20} {:>8} {:>12} {:>12} {:>12}  {}",
        "Benchmark", "Searches", "Total Time", "Avg", "Nodes", "Notes"
    );
    println!("{}", "-".repeat(96));

    for r in &results.results {
        println!(
            "{:<20} {:>8} {:>12} {:>12} {:>12}  {}",
            r.name,
            r.searches,
            format_duration(r.total_time),
            format_duration(r.avg_time),
            r.nodes,
            r.notes
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_position_is_open() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..10 {
            let (board, side) = random_position(&config, 8, &mut rng);
            assert_eq!(board.piece_count(), 8);
            assert_eq!(side, Side::Player);
            assert!(!connect4_core::is_win(&board, Side::Player));
            assert!(!connect4_core::is_win(&board, Side::Ai));
        }
    }

    #[test]
    fn test_pruned_and_plain_agree() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let positions: Vec<_> = (0..3).map(|_| random_position(&config, 6, &mut rng)).collect();

        let pruned = benchmark_search(&config, &positions, 3, true);
        let plain = benchmark_search(&config, &positions, 3, false);
        assert_eq!(pruned.chosen, plain.chosen);
        assert!(pruned.result.nodes <= plain.result.nodes);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_micros(2500)), "2.5ms");
        assert_eq!(format_duration(Duration::from_micros(12)), "12.0us");
    }
}
