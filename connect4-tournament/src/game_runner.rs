//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use connect4_core::{Difficulty, DifficultyPolicy, GameConfig, GameError, GameMode, GameSession, Side, TerminalStatus};

/// Outcome of a single game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    /// Final status (never `InProgress`)
    pub status: TerminalStatus,
    /// Columns played, in order
    pub moves: Vec<usize>,
    /// Tier that opened the game
    pub first: Difficulty,
    /// Tier that moved second
    pub second: Difficulty,
}

impl GameOutcome {
    /// Check if the opening tier won
    pub fn first_wins(&self) -> bool {
        self.status == TerminalStatus::Win(Side::Ai)
    }

    /// Check if the second tier won
    pub fn second_wins(&self) -> bool {
        self.status == TerminalStatus::Win(Side::Player)
    }

    pub fn is_draw(&self) -> bool {
        self.status == TerminalStatus::Draw
    }

    /// Winning tier (None for draw)
    pub fn winner_tier(&self) -> Option<Difficulty> {
        match self.status {
            TerminalStatus::Win(Side::Ai) => Some(self.first),
            TerminalStatus::Win(Side::Player) => Some(self.second),
            _ => None,
        }
    }
}

/// Game runner that plays AI-vs-AI games
pub struct GameRunner {
    config: GameConfig,
    /// Random seed counter
    seed_counter: u64,
}

impl GameRunner {
    /// Create a new game runner
    pub fn new(mut config: GameConfig, seed: u64) -> Self {
        // The opening tier always takes the Ai side
        config.first_turn = None;
        Self {
            config,
            seed_counter: seed,
        }
    }

    /// Play a single game to completion, `first` opening
    pub fn play_game(&mut self, first: Difficulty, second: Difficulty) -> Result<GameOutcome, GameError> {
        let seed = self.next_seed();
        let mut policy = DifficultyPolicy::from_config(&self.config, Some(seed));

        let mut session = GameSession::new(self.config.clone());
        session.start(GameMode::AiVsAi { first, second })?;

        while !session.is_over() {
            session.ai_move(&mut policy)?;
        }

        let moves: Vec<usize> = session.history().iter().map(|m| m.column).collect();
        tracing::debug!(%first, %second, status = ?session.status(), moves = moves.len(), seed, "game finished");

        Ok(GameOutcome {
            status: session.status(),
            moves,
            first,
            second,
        })
    }

    /// Get next seed and increment counter
    fn next_seed(&mut self) -> u64 {
        let seed = self.seed_counter;
        self.seed_counter = self.seed_counter.wrapping_add(1);
        seed
    }

    /// Reset seed counter
    pub fn reset_seed(&mut self, seed: u64) {
        self.seed_counter = seed;
    }

    /// Get configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
