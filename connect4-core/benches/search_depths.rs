//! Search cost per difficulty tier
//!
//! Measures:
//! 1. Time to find a move per tier on fixed positions
//! 2. Node counts with and without alpha-beta pruning
//! 3. Throughput of full AI-vs-AI games

use std::time::Instant;

use connect4_core::{
    Board, Difficulty, DifficultyPolicy, GameConfig, GameMode, GameSession, Heuristics, SearchEngine, Side,
    StrategyTable,
};

// ============================================================================
// TEST POSITIONS
// ============================================================================

/// Opening: empty board
fn position_opening() -> Board {
    Board::default()
}

/// Mid-game position with a few threats on the board
fn position_midgame() -> Board {
    let mut board = Board::default();
    let moves = [3, 3, 2, 4, 4, 2, 5, 1, 3, 6];
    let mut side = Side::Player;
    for col in moves {
        if let Some(row) = board.next_open_row(col) {
            board.drop_piece(row, col, side);
        }
        side = side.opponent();
    }
    board
}

// ============================================================================
// BENCHMARK STRUCTURES
// ============================================================================

#[derive(Clone, Debug)]
struct BenchmarkResult {
    label: String,
    position: String,
    avg_move_time_ms: f64,
    moves_per_second: f64,
}

impl BenchmarkResult {
    fn to_table_row(&self) -> String {
        format!(
            "| {:<13} | {:<9} | {:>10.2}ms | {:>9.0} |",
            self.label, self.position, self.avg_move_time_ms, self.moves_per_second
        )
    }
}

// ============================================================================
// BENCHMARK: Time to Find Move
// ============================================================================

fn benchmark_move_time(board: &Board, position_name: &str) -> Vec<BenchmarkResult> {
    println!("\n=== MOVE TIME BENCHMARK: {} ===", position_name);
    let mut results = Vec::new();

    for difficulty in Difficulty::ALL {
        print!("  {} ... ", difficulty);
        let mut policy = DifficultyPolicy::new(StrategyTable::default(), Heuristics::default());
        let iterations = 5;
        let mut total_time = 0.0;

        for _ in 0..iterations {
            let start = Instant::now();
            let _ = policy.choose_move(difficulty, board, Side::Player);
            total_time += start.elapsed().as_secs_f64() * 1000.0;
        }

        let avg_time = total_time / iterations as f64;
        results.push(BenchmarkResult {
            label: difficulty.to_string(),
            position: position_name.to_string(),
            avg_move_time_ms: avg_time,
            moves_per_second: 1000.0 / avg_time.max(1e-6),
        });

        println!("{:.2}ms", avg_time);
    }

    results
}

// ============================================================================
// BENCHMARK: Pruning Effectiveness
// ============================================================================

fn benchmark_pruning(board: &Board, position_name: &str) {
    println!("\n=== PRUNING BENCHMARK: {} ===", position_name);

    for depth in [2, 4, 6] {
        let mut pruned = SearchEngine::new(Heuristics::default(), Side::Player);
        let mut plain = SearchEngine::without_pruning(Heuristics::default(), Side::Player);

        let a = pruned.search(board, depth);
        let b = plain.search(board, depth);

        let ratio = plain.nodes() as f64 / pruned.nodes().max(1) as f64;
        println!(
            "  depth {}: {} nodes pruned, {} plain ({:.1}x), same result: {}",
            depth,
            pruned.nodes(),
            plain.nodes(),
            ratio,
            a == b
        );
    }
}

// ============================================================================
// BENCHMARK: Throughput (Full Games)
// ============================================================================

fn benchmark_throughput() {
    println!("\n=== THROUGHPUT BENCHMARK ===");
    let pairings = [
        (Difficulty::Easy, Difficulty::Easy),
        (Difficulty::Intermediate, Difficulty::Easy),
        (Difficulty::Hard, Difficulty::Intermediate),
    ];

    for (first, second) in pairings {
        let mut policy = DifficultyPolicy::with_seed(StrategyTable::default(), Heuristics::default(), 7);
        let mut session = GameSession::new(GameConfig::default());
        if session.start(GameMode::AiVsAi { first, second }).is_err() {
            continue;
        }

        let start = Instant::now();
        while !session.is_over() {
            if session.ai_move(&mut policy).is_err() {
                break;
            }
        }
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;
        let moves = session.history().len();

        println!(
            "  {} vs {}: {:?} after {} moves in {:.0}ms ({:.0}/sec)",
            first,
            second,
            session.status(),
            moves,
            elapsed,
            moves as f64 / elapsed.max(1e-6) * 1000.0
        );
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    println!("\n=== CONNECT FOUR: search depth benchmark ===");

    let opening = position_opening();
    let midgame = position_midgame();

    let mut all_results = Vec::new();
    all_results.extend(benchmark_move_time(&opening, "Opening"));
    all_results.extend(benchmark_move_time(&midgame, "Mid-Game"));

    benchmark_pruning(&opening, "Opening");
    benchmark_pruning(&midgame, "Mid-Game");

    benchmark_throughput();

    println!("\n| Tier          | Position  |     Avg Move | Moves/Sec |");
    println!("|---------------|-----------|--------------|-----------|");
    for result in &all_results {
        println!("{}", result.to_table_row());
    }

    println!("\nDepth scaling (Mid-Game):");
    let tiers = [Difficulty::Hard, Difficulty::Impossible, Difficulty::Godmode];
    for pair in tiers.windows(2) {
        let find = |d: Difficulty| {
            all_results
                .iter()
                .find(|r| r.label == d.to_string() && r.position == "Mid-Game")
        };
        if let (Some(prev), Some(next)) = (find(pair[0]), find(pair[1])) {
            println!(
                "  {} -> {}: {:.1}x slower",
                pair[0],
                pair[1],
                next.avg_move_time_ms / prev.avg_move_time_ms.max(1e-6)
            );
        }
    }
    println!();
}
