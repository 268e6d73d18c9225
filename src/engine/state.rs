use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::spawn::{self, TileSource};
use super::{ops, CELLS, N, Score, Tile};
use crate::error::EngineError;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in a fixed order used for tie-breaking.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(s)
    }
}

impl FromStr for Move {
    type Err = EngineError;

    /// Accepts full names, arrow-key style `wasd`, and vi-style `hjkl`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" | "k" => Ok(Move::Up),
            "down" | "s" | "j" => Ok(Move::Down),
            "left" | "a" | "h" => Ok(Move::Left),
            "right" | "d" | "l" => Ok(Move::Right),
            other => Err(EngineError::InvalidDirection(other.to_string())),
        }
    }
}

impl TryFrom<u8> for Move {
    type Error = EngineError;

    /// 0 = Up, 1 = Down, 2 = Left, 3 = Right.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Move::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| EngineError::InvalidDirection(code.to_string()))
    }
}

impl From<Move> for u8 {
    fn from(m: Move) -> Self {
        match m {
            Move::Up => 0,
            Move::Down => 1,
            Move::Left => 2,
            Move::Right => 3,
        }
    }
}

/// Outcome of sliding a board: the resulting board and the merge score earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shifted {
    pub board: Board,
    pub score: Score,
}

/// 4x4 board of tile values in row-major order; 0 is an empty cell.
///
/// `Board` is a plain `Copy` value: handing one out never aliases the
/// engine's own state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(pub(crate) [Tile; CELLS]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([0; CELLS]);

    /// Build a board from row-major cell values.
    ///
    /// Every value must be 0 or a power of two no smaller than 2.
    ///
    /// ```
    /// use game_2048::engine::Board;
    /// let b = Board::from_cells(&[2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
    /// assert_eq!(b.count_empty(), 14);
    /// assert!(Board::from_cells(&[3; 16]).is_err());
    /// ```
    pub fn from_cells(cells: &[Tile]) -> Result<Self, EngineError> {
        let arr: [Tile; CELLS] = cells.try_into().map_err(|_| EngineError::CellCount {
            expected: CELLS,
            got: cells.len(),
        })?;
        if let Some((index, &value)) = arr
            .iter()
            .enumerate()
            .find(|&(_, &v)| v != 0 && (v < 2 || !v.is_power_of_two()))
        {
            return Err(EngineError::InvalidTile { index, value });
        }
        debug!("board built from cells: {arr:?}");
        Ok(Board(arr))
    }

    /// Borrow the cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Tile; CELLS] {
        &self.0
    }

    /// Consume the board, returning its cells.
    #[inline]
    pub fn into_cells(self) -> [Tile; CELLS] {
        self.0
    }

    /// Value at flat index `idx` (0 if empty). Index runs 0..16 row-major.
    #[inline]
    pub fn tile_value(&self, idx: usize) -> Tile {
        self.0[idx]
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.0[super::index(row, col)]
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize {
        ops::count_empty(self)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count_empty() == 0
    }

    /// Return the highest tile value present (0 on an empty board).
    pub fn highest_tile(&self) -> Tile {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> Score {
        self.0.iter().map(|&v| Score::from(v)).sum()
    }

    /// Return the board resulting from sliding/merging tiles in `dir`, plus the
    /// merge score. No random insert.
    ///
    /// ```
    /// use game_2048::engine::{Board, Move};
    /// let b = Board::from_cells(&[2, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
    /// let shifted = b.shift(Move::Right);
    /// assert_eq!(shifted.board.get(0, 3), 4);
    /// assert_eq!(shifted.score, 4);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> Shifted {
        ops::shift(self, dir)
    }

    /// True if sliding in `dir` changes the board.
    pub fn can_move(self, dir: Move) -> bool {
        self.shift(dir).board != self
    }

    /// Directions that change the board, in `Move::ALL` order.
    pub fn legal_moves(self) -> Vec<Move> {
        Move::ALL.into_iter().filter(|&m| self.can_move(m)).collect()
    }

    /// True if the board is full and no two neighbouring tiles are equal.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        ops::is_game_over(self)
    }

    /// Place a spawn tile into a random empty cell drawn from `source`.
    ///
    /// Returns `None` when the board is full.
    pub fn with_spawned_tile<S: TileSource + ?Sized>(self, source: &mut S) -> Option<Board> {
        let mut next = self;
        spawn::spawn_into(&mut next, source).map(|_| next)
    }

    /// Iterate over tile values in row-major order.
    #[inline]
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.0.iter().copied()
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.0.chunks(N)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(N * 8 - 1);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f, "{rule}")?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl IntoIterator for Board {
    type Item = Tile;
    type IntoIter = std::array::IntoIter<Tile, CELLS>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// Centered in a 7-wide cell; empty cells are blank.
fn format_val(val: Tile) -> String {
    if val == 0 {
        return " ".repeat(7);
    }
    format!("{:^7}", val)
}
