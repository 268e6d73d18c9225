//! Engine module: the 4x4 board value, directional slide/merge resolution,
//! tile spawning and terminal-state detection.
//!
//! - `Board` is the plain-value 4x4 state with query and shift methods.
//! - `GridEngine` owns a board, its score and a random source, and drives
//!   the move -> spawn -> game-over cycle.
//! - Line resolution and spawning internals live in submodules.

mod grid;
mod ops;
mod spawn;
pub mod state;

pub use grid::{GameStatus, GridEngine, MoveResult, StepResult};
pub use ops::{count_empty, is_game_over, shift, slide_line};
pub use spawn::{ScriptedSource, TileSource};
pub use state::{Board, Move, Shifted};

/// Board dimension.
pub const N: usize = 4;
/// Number of cells on the board.
pub const CELLS: usize = N * N;
/// Value of every spawned tile.
pub const SPAWN_VALUE: Tile = 2;
/// Tiles placed by `GridEngine::new_game`.
pub const START_TILES: usize = 2;

pub type Tile = u32;
pub type Score = u64;

/// Flat row-major index of `(row, col)`.
#[inline]
pub const fn index(row: usize, col: usize) -> usize {
    N * row + col
}
