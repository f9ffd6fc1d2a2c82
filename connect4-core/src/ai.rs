//! CPU-based minimax AI with alpha-beta pruning

use serde::{Deserialize, Serialize};

use crate::board::{Board, Side};
use crate::eval::{evaluate, DirectionMask, Heuristics};
use crate::rules::{classify, TerminalStatus};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Score of a decided game before the depth bonus (effectively infinite)
pub const WIN_SCORE: i32 = 1_000_000;

/// Initial alpha/beta bound; `-INFINITY` is also representable
pub const INFINITY: i32 = i32::MAX;

// ============================================================================
// SEARCH ENGINE
// ============================================================================

/// Chosen column and its minimax score
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub column: usize,
    pub score: i32,
}

/// Minimax search optimizing for one side
///
/// Children are value copies of the parent board, so sibling branches never
/// observe each other's placements.
#[derive(Clone, Debug)]
pub struct SearchEngine {
    heuristics: Heuristics,
    side: Side,
    pruning: bool,
    nodes: u64,
}

impl SearchEngine {
    pub fn new(heuristics: Heuristics, side: Side) -> Self {
        Self {
            heuristics,
            side,
            pruning: true,
            nodes: 0,
        }
    }

    /// Plain minimax: same move order and tie-break, no cutoffs
    pub fn without_pruning(heuristics: Heuristics, side: Side) -> Self {
        Self {
            pruning: false,
            ..Self::new(heuristics, side)
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Nodes visited by the last [`SearchEngine::search`]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Best move for the engine's side, `None` if the board has no legal column.
    ///
    /// The root always expands, so a `depth` of 0 searches one ply.
    pub fn search(&mut self, board: &Board, depth: u32) -> Option<SearchResult> {
        self.nodes = 0;
        let depth = depth.max(1);
        let (column, score) = self.minimax(board, depth, -INFINITY, INFINITY, true);

        tracing::trace!(
            side = %self.side,
            depth,
            nodes = self.nodes,
            ?column,
            score,
            "search finished"
        );

        column.map(|column| SearchResult { column, score })
    }

    /// One node of the game tree.
    ///
    /// `maximizing` is true when the engine's side is to move. Returns the
    /// best column at this node (`None` at leaves) and its score.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (Option<usize>, i32) {
        self.nodes += 1;

        // Whoever moved into this node
        let mover = if maximizing {
            self.side.opponent()
        } else {
            self.side
        };

        match classify(board, mover) {
            TerminalStatus::Win(winner) => return (None, self.win_score(winner, depth)),
            TerminalStatus::Draw => return (None, 0),
            TerminalStatus::InProgress => {}
        }

        if depth == 0 {
            let score = evaluate(board, self.side, &self.heuristics, DirectionMask::ALL);
            return (None, score);
        }

        let to_move = if maximizing {
            self.side
        } else {
            self.side.opponent()
        };

        let mut best_column = None;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for col in board.center_out_columns() {
            let Some(row) = board.next_open_row(col) else {
                continue;
            };

            let mut child = board.clone();
            child.drop_piece(row, col, to_move);

            let (_, score) = self.minimax(&child, depth - 1, alpha, beta, !maximizing);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_column = Some(col);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_column = Some(col);
                }
                beta = beta.min(best_score);
            }

            if self.pruning && alpha >= beta {
                break;
            }
        }

        (best_column, best_score)
    }

    /// Decisive score; a larger remaining depth means the result comes sooner
    fn win_score(&self, winner: Side, depth: u32) -> i32 {
        let score = WIN_SCORE + depth as i32;
        if winner == self.side {
            score
        } else {
            -score
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
