//! Play command - interactive game in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), run_game()
//! - Level 3: human_turn(), computer_turn()
//! - Level 4: input parsing, rendering

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};

use connect4_core::{
    Difficulty, DifficultyPolicy, GameConfig, GameError, GameMode, GameSession, Seat, Side, TerminalStatus,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Two humans at one keyboard
    Human,
    /// Human against the computer
    Ai,
    /// Computer against computer
    AiVsAi,
}

#[derive(Args)]
pub struct PlayArgs {
    #[arg(long, value_enum, default_value = "ai")]
    pub mode: ModeArg,

    /// Computer strength (the opening tier in ai-vs-ai)
    #[arg(long, default_value = "hard")]
    pub difficulty: Difficulty,

    /// Second tier for ai-vs-ai (defaults to --difficulty)
    #[arg(long)]
    pub second: Option<Difficulty>,

    /// Board rows (overrides config)
    #[arg(long)]
    pub rows: Option<usize>,

    /// Board columns (overrides config)
    #[arg(long)]
    pub cols: Option<usize>,

    /// Let the computer move first
    #[arg(long)]
    pub ai_first: bool,
}

impl PlayArgs {
    fn mode(&self) -> GameMode {
        match self.mode {
            ModeArg::Human => GameMode::HumanVsHuman,
            ModeArg::Ai => GameMode::HumanVsAi(self.difficulty),
            ModeArg::AiVsAi => GameMode::AiVsAi {
                first: self.difficulty,
                second: self.second.unwrap_or(self.difficulty),
            },
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, config: GameConfig, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, config)?;
    let mode = args.mode();

    tracing::info!(?mode, rows = config.rows, cols = config.cols, "starting game");

    let mut policy = DifficultyPolicy::from_config(&config, seed);
    let mut session = GameSession::new(config);
    session.start(mode)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_game(&mut session, &mut policy, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Apply command-line overrides and validate
fn build_config(args: &PlayArgs, mut config: GameConfig) -> Result<GameConfig> {
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if args.ai_first {
        config.first_turn = Some(Side::Ai);
    }
    config.validate()?;
    Ok(config)
}

/// Drive a started session until it ends or input runs out.
///
/// Returns the final status, or `None` if the human quit.
pub fn run_game<R: BufRead, W: Write>(
    session: &mut GameSession,
    policy: &mut DifficultyPolicy,
    input: &mut R,
    out: &mut W,
) -> Result<Option<TerminalStatus>> {
    loop {
        if session.is_over() {
            writeln!(out, "\n{}", session.board())?;
            writeln!(out, "{}", describe_result(session.status()))?;
            return Ok(Some(session.status()));
        }

        match session.seat_to_move() {
            Some(Seat::Computer(difficulty)) => computer_turn(session, policy, difficulty, out)?,
            Some(Seat::Human) => {
                if !human_turn(session, input, out)? {
                    writeln!(out, "\nGoodbye.")?;
                    return Ok(None);
                }
            }
            None => bail!("game has not been started"),
        }
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn computer_turn<W: Write>(
    session: &mut GameSession,
    policy: &mut DifficultyPolicy,
    difficulty: Difficulty,
    out: &mut W,
) -> Result<()> {
    let played = session.ai_move(policy)?;
    writeln!(
        out,
        "{} ({}) drops in column {}",
        side_label(played.side),
        difficulty,
        played.column + 1
    )?;
    Ok(())
}

/// Read one human move, re-prompting on bad input. `false` on quit or EOF.
fn human_turn<R: BufRead, W: Write>(session: &mut GameSession, input: &mut R, out: &mut W) -> Result<bool> {
    let cols = session.board().cols();
    writeln!(out, "\n{}", session.board())?;

    loop {
        write!(out, "{}, choose a column (1-{}): ", side_label(session.turn()), cols)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }

        let Some(column) = parse_column(&line, cols) else {
            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
                return Ok(false);
            }
            writeln!(out, "Please enter a number between 1 and {} (or q to quit).", cols)?;
            continue;
        };

        match session.play(column) {
            Ok(_) => return Ok(true),
            Err(GameError::ColumnFull(_)) => {
                writeln!(out, "Column {} is full. Try another column.", column + 1)?;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// 1-based column text to a 0-based index
fn parse_column(text: &str, cols: usize) -> Option<usize> {
    match text.trim().parse::<usize>() {
        Ok(n) if (1..=cols).contains(&n) => Some(n - 1),
        _ => None,
    }
}

fn side_label(side: Side) -> &'static str {
    match side {
        Side::Player => "Player (X)",
        Side::Ai => "AI (O)",
    }
}

fn describe_result(status: TerminalStatus) -> String {
    match status {
        TerminalStatus::Win(side) => format!("{} wins!", side_label(side)),
        TerminalStatus::Draw => "It's a draw.".to_string(),
        TerminalStatus::InProgress => "Game in progress.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect4_core::{Heuristics, StrategyTable};
    use std::io::Cursor;

    fn session(mode: GameMode) -> GameSession {
        let mut session = GameSession::new(GameConfig::default());
        session.start(mode).unwrap();
        session
    }

    fn policy() -> DifficultyPolicy {
        DifficultyPolicy::with_seed(StrategyTable::default(), Heuristics::default(), 1)
    }

    #[test]
    fn test_parse_column() {
        assert_eq!(parse_column("1\n", 7), Some(0));
        assert_eq!(parse_column(" 7 ", 7), Some(6));
        assert_eq!(parse_column("0", 7), None);
        assert_eq!(parse_column("8", 7), None);
        assert_eq!(parse_column("x", 7), None);
    }

    #[test]
    fn test_two_humans_vertical_win() {
        let mut session = session(GameMode::HumanVsHuman);
        let mut input = Cursor::new("1\n2\n1\n2\n1\n2\n1\n");
        let mut out = Vec::new();

        let status = run_game(&mut session, &mut policy(), &mut input, &mut out).unwrap();
        assert_eq!(status, Some(TerminalStatus::Win(Side::Player)));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Player (X) wins!"));
    }

    #[test]
    fn test_bad_input_reprompts_then_eof_quits() {
        let mut session = session(GameMode::HumanVsHuman);
        let mut input = Cursor::new("abc\n9\n4\n");
        let mut out = Vec::new();

        let status = run_game(&mut session, &mut policy(), &mut input, &mut out).unwrap();
        assert_eq!(status, None);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].column, 3);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("between 1 and 7").count(), 2);
        assert!(text.contains("Goodbye."));
    }

    #[test]
    fn test_full_column_reprompts() {
        let mut session = session(GameMode::HumanVsHuman);
        let mut input = Cursor::new("1\n1\n1\n1\n1\n1\n1\nq\n");
        let mut out = Vec::new();

        let status = run_game(&mut session, &mut policy(), &mut input, &mut out).unwrap();
        assert_eq!(status, None);
        assert_eq!(session.history().len(), 6);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Column 1 is full"));
    }

    #[test]
    fn test_computer_answers_human() {
        let mut session = session(GameMode::HumanVsAi(Difficulty::Hard));
        let mut input = Cursor::new("4\n");
        let mut out = Vec::new();

        run_game(&mut session, &mut policy(), &mut input, &mut out).unwrap();
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1].side, Side::Ai);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("AI (O) (hard) drops in column"));
    }

    #[test]
    fn test_ai_vs_ai_needs_no_input() {
        let mut session = session(GameMode::AiVsAi {
            first: Difficulty::Intermediate,
            second: Difficulty::Easy,
        });
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        let status = run_game(&mut session, &mut policy(), &mut input, &mut out).unwrap();
        assert!(status.unwrap().is_terminal());
    }

    #[test]
    fn test_build_config_overrides() {
        let args = PlayArgs {
            mode: ModeArg::Ai,
            difficulty: Difficulty::Easy,
            second: None,
            rows: Some(5),
            cols: Some(8),
            ai_first: true,
        };
        let config = build_config(&args, GameConfig::default()).unwrap();
        assert_eq!((config.rows, config.cols), (5, 8));
        assert_eq!(config.first_turn, Some(Side::Ai));

        let tiny = PlayArgs {
            rows: Some(2),
            cols: Some(2),
            ..args
        };
        assert!(build_config(&tiny, GameConfig::default()).is_err());
    }
}
