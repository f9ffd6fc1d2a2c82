//! Win, draw and terminal-state classification

use serde::{Deserialize, Serialize};

use crate::board::{Board, Direction, Side, Window};

/// Status of a board after a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalStatus {
    InProgress,
    Win(Side),
    Draw,
}

impl TerminalStatus {
    pub fn is_terminal(self) -> bool {
        self != TerminalStatus::InProgress
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            TerminalStatus::Win(side) => Some(side),
            _ => None,
        }
    }
}

fn is_run(board: &Board, window: &Window, side: Side) -> bool {
    let piece = side.piece();
    window
        .cells
        .iter()
        .all(|&(row, col)| board.cell(row, col) == piece)
}

/// Check for four in a row in a single direction
pub fn is_win_in(board: &Board, side: Side, direction: Direction) -> bool {
    board
        .windows_in(direction)
        .any(|window| is_run(board, &window, side))
}

/// Check for four in a row in any direction
pub fn is_win(board: &Board, side: Side) -> bool {
    board.windows().any(|window| is_run(board, &window, side))
}

/// Every window completely held by `side`, each reported once
pub fn winning_windows(board: &Board, side: Side) -> Vec<Window> {
    board
        .windows()
        .filter(|window| is_run(board, window, side))
        .collect()
}

/// Board is full and nobody has won
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && !is_win(board, Side::Player) && !is_win(board, Side::Ai)
}

/// Classify the board after `side_just_moved` placed a piece
pub fn classify(board: &Board, side_just_moved: Side) -> TerminalStatus {
    if is_win(board, side_just_moved) {
        TerminalStatus::Win(side_just_moved)
    } else if is_draw(board) {
        TerminalStatus::Draw
    } else {
        TerminalStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, cells: &[(usize, usize)], side: Side) {
        for &(row, col) in cells {
            board.drop_piece(row, col, side);
        }
    }

    /// Full 6x7 board with no four in a row for either side (top row first)
    fn drawn_board() -> Board {
        let rows = [
            "OOXXOOX",
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "XXOOXXO",
        ];
        let mut board = Board::new(6, 7);
        for (i, line) in rows.iter().enumerate() {
            let row = rows.len() - 1 - i;
            for (col, symbol) in line.chars().enumerate() {
                let side = if symbol == 'X' { Side::Player } else { Side::Ai };
                board.drop_piece(row, col, side);
            }
        }
        board
    }

    #[test]
    fn find_winner_horizontally() {
        let mut board = Board::default();
        place(&mut board, &[(0, 0), (0, 1), (0, 2)], Side::Player);
        assert!(!is_win_in(&board, Side::Player, Direction::Horizontal));
        assert!(!is_win(&board, Side::Player));

        board.drop_piece(0, 3, Side::Player);
        assert!(is_win_in(&board, Side::Player, Direction::Horizontal));
        assert!(is_win(&board, Side::Player));
        assert!(!is_win(&board, Side::Ai));
    }

    #[test]
    fn find_winner_vertically() {
        let mut board = Board::default();
        place(&mut board, &[(0, 5), (1, 5), (2, 5)], Side::Ai);
        assert!(!is_win(&board, Side::Ai));

        board.drop_piece(3, 5, Side::Ai);
        assert!(is_win_in(&board, Side::Ai, Direction::Vertical));
        assert!(is_win(&board, Side::Ai));
        assert!(!is_win(&board, Side::Player));
    }

    #[test]
    fn find_winner_diagonally() {
        // direction=/, winner=no
        {
            let mut board = Board::default();
            place(&mut board, &[(0, 0), (1, 1), (2, 2), (4, 3)], Side::Player);
            assert!(!is_win(&board, Side::Player));
        }
        // direction=/, winner=yes
        {
            let mut board = Board::default();
            place(&mut board, &[(0, 3), (1, 4), (2, 5), (3, 6)], Side::Player);
            assert!(is_win_in(&board, Side::Player, Direction::DiagonalUp));
            assert!(!is_win_in(&board, Side::Player, Direction::DiagonalDown));
        }
        // direction=\, winner=yes
        {
            let mut board = Board::default();
            place(&mut board, &[(4, 3), (3, 4), (2, 5), (1, 6)], Side::Ai);
            assert!(is_win_in(&board, Side::Ai, Direction::DiagonalDown));
            assert!(is_win(&board, Side::Ai));
        }
        // smallest board, both diagonals
        {
            let mut board = Board::new(4, 4);
            place(&mut board, &[(0, 0), (1, 1), (2, 2), (3, 3)], Side::Player);
            place(&mut board, &[(0, 3), (1, 2), (2, 1), (3, 0)], Side::Ai);
            assert!(is_win_in(&board, Side::Player, Direction::DiagonalUp));
            assert!(is_win_in(&board, Side::Ai, Direction::DiagonalDown));
        }
    }

    #[test]
    fn test_each_run_detected_once() {
        let runs: [(Direction, [(usize, usize); 4]); 4] = [
            (Direction::Horizontal, [(2, 1), (2, 2), (2, 3), (2, 4)]),
            (Direction::Vertical, [(1, 6), (2, 6), (3, 6), (4, 6)]),
            (Direction::DiagonalUp, [(1, 0), (2, 1), (3, 2), (4, 3)]),
            (Direction::DiagonalDown, [(5, 2), (4, 3), (3, 4), (2, 5)]),
        ];

        for (direction, cells) in runs {
            let mut board = Board::default();
            place(&mut board, &cells, Side::Player);

            let found = winning_windows(&board, Side::Player);
            assert_eq!(found.len(), 1, "{:?} run should be found exactly once", direction);
            assert_eq!(found[0].direction, direction);

            let mut expected = cells;
            let mut actual = found[0].cells;
            expected.sort();
            actual.sort();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_two_distinct_runs() {
        let mut board = Board::default();
        place(&mut board, &[(0, 0), (0, 1), (0, 2), (0, 3)], Side::Ai);
        place(&mut board, &[(1, 6), (2, 6), (3, 6), (4, 6)], Side::Ai);
        assert_eq!(winning_windows(&board, Side::Ai).len(), 2);
    }

    #[test]
    fn test_three_is_not_a_win() {
        let mut board = Board::default();
        place(&mut board, &[(0, 0), (0, 1), (0, 2)], Side::Player);
        assert!(!is_win(&board, Side::Player));
        assert_eq!(classify(&board, Side::Player), TerminalStatus::InProgress);
    }

    #[test]
    fn test_full_board_without_winner_is_draw() {
        let board = drawn_board();
        assert!(board.is_full());
        assert!(!is_win(&board, Side::Player));
        assert!(!is_win(&board, Side::Ai));
        assert!(is_draw(&board));
        assert_eq!(classify(&board, Side::Player), TerminalStatus::Draw);
        assert_eq!(classify(&board, Side::Ai), TerminalStatus::Draw);
    }

    #[test]
    fn test_classify_win() {
        let mut board = Board::default();
        place(&mut board, &[(0, 2), (1, 2), (2, 2), (3, 2)], Side::Ai);
        let status = classify(&board, Side::Ai);
        assert_eq!(status, TerminalStatus::Win(Side::Ai));
        assert!(status.is_terminal());
        assert_eq!(status.winner(), Some(Side::Ai));
        assert!(!is_draw(&board));
    }
}
