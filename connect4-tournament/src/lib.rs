//! Connect Four Arena - AI-vs-AI play between difficulty tiers
//!
//! This crate provides arena infrastructure:
//! - Single games between two tiers
//! - Matches alternating which tier opens
//! - Round-robin ladder over a set of tiers
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_ladder (orchestration)
//! - Level 2: play_match (phases)
//! - Level 3: GameRunner::play_game (steps)
//! - Level 4: configuration

mod config;
mod game_runner;
mod match_play;
mod tournament;

pub use config::ArenaConfig;
pub use game_runner::{GameOutcome, GameRunner};
pub use match_play::{play_match, MatchResult};
pub use tournament::{run_ladder, LadderResult, Standing};
