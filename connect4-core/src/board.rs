//! Board geometry: gravity grid, sides and the 4-cell windows

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of pieces in a row needed to win
pub const SERIES_LEN: usize = 4;

/// Standard board size
pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

// ============================================================================
// SIDES AND CELLS
// ============================================================================

/// One of the two players
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// The piece this side drops
    pub fn piece(self) -> Cell {
        match self {
            Side::Player => Cell::PlayerPiece,
            Side::Ai => Cell::AiPiece,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Ai => write!(f, "ai"),
        }
    }
}

/// Content of a single board cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    PlayerPiece,
    AiPiece,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Owner of the piece in this cell
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::PlayerPiece => Some(Side::Player),
            Cell::AiPiece => Some(Side::Ai),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::PlayerPiece => 'X',
            Cell::AiPiece => 'O',
        }
    }
}

// ============================================================================
// WINDOWS
// ============================================================================

/// Scanning direction for lines of four
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right (`/`)
    DiagonalUp,
    /// Top-left to bottom-right (`\`)
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalUp,
        Direction::DiagonalDown,
    ];

    pub fn index(self) -> usize {
        match self {
            Direction::Horizontal => 0,
            Direction::Vertical => 1,
            Direction::DiagonalUp => 2,
            Direction::DiagonalDown => 3,
        }
    }

    /// Step as (row delta, column delta); row 0 is the bottom row
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalUp => (1, 1),
            Direction::DiagonalDown => (-1, 1),
        }
    }
}

/// A contiguous run of [`SERIES_LEN`] cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Window {
    pub direction: Direction,
    /// (row, col) coordinates, starting cell first
    pub cells: [(usize, usize); SERIES_LEN],
}

/// Every in-bounds window of one direction on a `rows x cols` grid
fn windows_for(rows: usize, cols: usize, direction: Direction) -> impl Iterator<Item = Window> {
    let (rows, cols) = (rows as isize, cols as isize);
    let (dr, dc) = direction.step();
    let span = (SERIES_LEN - 1) as isize;

    (0..rows)
        .flat_map(move |r| (0..cols).map(move |c| (r, c)))
        .filter(move |&(r, c)| {
            let (end_r, end_c) = (r + dr * span, c + dc * span);
            (0..rows).contains(&end_r) && (0..cols).contains(&end_c)
        })
        .map(move |(r, c)| {
            let mut cells = [(0, 0); SERIES_LEN];
            for (i, cell) in cells.iter_mut().enumerate() {
                let i = i as isize;
                *cell = ((r + dr * i) as usize, (c + dc * i) as usize);
            }
            Window { direction, cells }
        })
}

// ============================================================================
// BOARD
// ============================================================================

/// Game board (clone to branch)
///
/// Cells are stored row-major with row 0 at the bottom, so a piece dropped
/// into an empty column lands in row 0.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Board {
    /// Create an empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at (row, col). Panics when out of range.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) out of range");
        self.cells[row * self.cols + col]
    }

    /// True iff `col` is on the board and its top cell is empty
    pub fn is_valid_column(&self, col: usize) -> bool {
        col < self.cols && self.rows > 0 && self.cell(self.rows - 1, col).is_empty()
    }

    /// Lowest empty row in `col`, `None` if the column is full or off the board
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).find(|&row| self.cell(row, col).is_empty())
    }

    /// Place `side`'s piece at (row, col).
    ///
    /// No legality check: callers gate this with [`Board::is_valid_column`]
    /// and [`Board::next_open_row`].
    pub fn drop_piece(&mut self, row: usize, col: usize, side: Side) {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) out of range");
        self.cells[row * self.cols + col] = side.piece();
    }

    /// Column indices where a drop is legal, left to right
    pub fn valid_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cols).filter(|&col| self.is_valid_column(col))
    }

    /// Column indices ordered from the center outwards, left side first on ties
    pub fn center_out_columns(&self) -> Vec<usize> {
        let center = self.center_column();
        let mut order = Vec::with_capacity(self.cols);
        if self.cols == 0 {
            return order;
        }
        order.push(center);
        for offset in 1..self.cols {
            if offset <= center {
                order.push(center - offset);
            }
            if center + offset < self.cols {
                order.push(center + offset);
            }
        }
        order
    }

    /// Column that receives the center bonus
    pub fn center_column(&self) -> usize {
        self.cols / 2
    }

    /// No legal moves remain
    pub fn is_full(&self) -> bool {
        self.valid_columns().next().is_none()
    }

    /// Number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// All windows in one direction
    pub fn windows_in(&self, direction: Direction) -> impl Iterator<Item = Window> {
        windows_for(self.rows, self.cols, direction)
    }

    /// All windows in all four directions
    pub fn windows(&self) -> impl Iterator<Item = Window> {
        let (rows, cols) = (self.rows, self.cols);
        Direction::ALL
            .into_iter()
            .flat_map(move |direction| windows_for(rows, cols, direction))
    }

    /// Check the gravity invariant: no empty cell below an occupied one
    pub fn is_settled(&self) -> bool {
        (0..self.cols).all(|col| {
            let height = (0..self.rows)
                .take_while(|&row| !self.cell(row, col).is_empty())
                .count();
            (height..self.rows).all(|row| self.cell(row, col).is_empty())
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Top row first so the board reads naturally
        for row in (0..self.rows).rev() {
            let line: String = (0..self.cols)
                .map(|col| self.cell(row, col).symbol())
                .flat_map(|symbol| [symbol, ' '])
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        let labels: Vec<String> = (1..=self.cols).map(|col| (col % 10).to_string()).collect();
        write!(f, "{}", labels.join(" "))
    }
}
