//! Connect Four CLI - Command-line interface
//!
//! Commands:
//! - play: Play a game in the terminal (human or AI seats)
//! - match: Play several AI-vs-AI games between two tiers
//! - ladder: Round-robin between difficulty tiers
//! - benchmark: Search cost per depth, with and without pruning

mod benchmark;
mod ladder_cmd;
mod match_cmd;
mod play_cmd;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use connect4_core::GameConfig;

#[derive(Parser)]
#[command(name = "connect4")]
#[command(about = "Connect Four with minimax AI opponents")]
struct Cli {
    /// Random seed for reproducible AI behaviour
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Game configuration JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(play_cmd::PlayArgs),
    /// Play AI-vs-AI games between two tiers
    Match(match_cmd::MatchArgs),
    /// Round-robin between difficulty tiers
    Ladder(ladder_cmd::LadderArgs),
    /// Measure search cost per depth
    Benchmark(benchmark::BenchmarkArgs),
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, config, cli.seed),
        Commands::Match(args) => match_cmd::run(args, config, cli.seed),
        Commands::Ladder(args) => ladder_cmd::run(args, config, cli.seed),
        Commands::Benchmark(args) => benchmark::run(args, config, cli.seed),
    }
}

/// Configuration from `--config`, or defaults
fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => {
            let config = GameConfig::load(path)?;
            tracing::info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(GameConfig::default()),
    }
}
