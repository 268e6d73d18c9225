//! Self-play configuration, read from an optional TOML file and overridden by
//! command-line flags.
//!
//! ```toml
//! seed = 42
//! games = 200
//! max_moves = 5000
//! policy = "greedy"
//! threads = 4
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::policy::PolicyKind;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutoplayConfig {
    /// Base seed; game `i` is seeded with `seed + i`.
    pub seed: u64,
    /// Number of games to play.
    pub games: usize,
    /// Stop a game after this many effective moves (None = play to the end).
    pub max_moves: Option<u64>,
    pub policy: PolicyKind,
    /// Worker threads for the rayon pool (None = rayon default).
    pub threads: Option<usize>,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            games: 100,
            max_moves: None,
            policy: PolicyKind::Random,
            threads: None,
        }
    }
}

impl AutoplayConfig {
    pub fn from_toml(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.games == 0 {
            return Err(ConfigError::Invalid("games must be at least 1".into()));
        }
        if self.max_moves == Some(0) {
            return Err(ConfigError::Invalid("max_moves must be at least 1".into()));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::Invalid("threads must be at least 1".into()));
        }
        Ok(())
    }
}
