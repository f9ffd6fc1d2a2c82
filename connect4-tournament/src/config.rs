//! Configuration types for arena play
//!
//! Level 4 - Utilities and configuration

use connect4_core::GameConfig;

/// Arena configuration
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Board size, strategies and heuristics used for every game
    pub game: GameConfig,
    /// Number of games per match (should be even so both tiers open equally)
    pub games_per_match: usize,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Base seed; game `i` of a match uses `seed + i` (None = 42)
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            games_per_match: 10,
            parallel: true,
            seed: None,
        }
    }
}

impl ArenaConfig {
    /// Create config with specified games per match
    pub fn new(games_per_match: usize) -> Self {
        Self {
            games_per_match,
            ..Default::default()
        }
    }

    /// Set game configuration
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run games one after another
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn base_seed(&self) -> u64 {
        self.seed.unwrap_or(42)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_config_defaults() {
        let config = ArenaConfig::default();
        assert_eq!(config.games_per_match, 10);
        assert!(config.parallel);
        assert_eq!(config.base_seed(), 42);
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn test_arena_config_builders() {
        let config = ArenaConfig::new(4).with_seed(9).sequential();
        assert_eq!(config.games_per_match, 4);
        assert_eq!(config.base_seed(), 9);
        assert!(!config.parallel);
    }
}
