//! game-2048: a deterministic 2048 grid engine
//!
//! This crate provides:
//! - A plain-value 4x4 `Board` with slide/merge resolution (`shift`) and queries
//! - `GridEngine`, which owns one game (board, score, random source) and runs the
//!   move -> spawn -> game-over cycle
//! - Injectable randomness (`TileSource`): any `rand::Rng`, or a scripted source
//! - Simple move policies and a parallel self-play driver (`policy`, `selfplay`)
//!
//! Quick start:
//! ```
//! use game_2048::engine::{GridEngine, Move};
//!
//! // Deterministic game with a seeded RNG
//! let mut game = GridEngine::seeded(42);
//! let before = game.board();
//! let step = game.step(Move::Left);
//! if step.moved.changed {
//!     assert_ne!(game.board(), before);
//! }
//! println!("{}score: {}", game.board(), game.score());
//! ```
//!
//! Tests can pin spawn placement with `ScriptedSource`:
//! ```
//! use game_2048::engine::{Board, GridEngine, Move, ScriptedSource};
//!
//! let board = Board::from_cells(&[2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
//! let mut game = GridEngine::with_board(board, ScriptedSource::new([15]));
//! let step = game.step(Move::Left);
//! assert_eq!(step.moved.score_delta, 4);
//! assert_eq!(game.snapshot()[0], 4);
//! assert_eq!(game.snapshot()[15], 2);
//! ```
//!
pub mod config;
pub mod engine;
pub mod error;
pub mod policy;
pub mod selfplay;

pub use error::{ConfigError, EngineError};
