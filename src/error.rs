use std::io;

use crate::engine::Tile;

/// Errors raised at the fallible edges of the engine (parsing, board construction).
///
/// Move resolution, spawning and terminal detection are total and never fail.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),
    #[error("expected {expected} cells, got {got}")]
    CellCount { expected: usize, got: usize },
    #[error("invalid tile {value} at index {index}")]
    InvalidTile { index: usize, value: Tile },
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
