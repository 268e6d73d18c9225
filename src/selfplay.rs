//! Policy-driven self-play: single games and rayon-parallel batches.

use std::collections::BTreeMap;

use log::debug;
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::AutoplayConfig;
use crate::engine::{GridEngine, Score, Tile};
use crate::policy::PolicyKind;

// Decorrelates the policy's RNG stream from the spawn stream of the same game.
const POLICY_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub seed: u64,
    /// Moves that changed the board.
    pub moves: u64,
    pub score: Score,
    pub highest_tile: Tile,
    /// False when the game was cut off by `max_moves`.
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub games: usize,
    pub total_moves: u64,
    pub mean_score: f64,
    pub min_score: Score,
    pub max_score: Score,
    pub highest_tile: Tile,
    /// Highest tile reached -> number of games.
    pub tile_histogram: BTreeMap<Tile, usize>,
}

impl BatchSummary {
    pub fn from_games(games: &[GameSummary]) -> Self {
        let mut tile_histogram = BTreeMap::new();
        for g in games {
            *tile_histogram.entry(g.highest_tile).or_insert(0) += 1;
        }
        let total_score: Score = games.iter().map(|g| g.score).sum();
        Self {
            games: games.len(),
            total_moves: games.iter().map(|g| g.moves).sum(),
            mean_score: if games.is_empty() {
                0.0
            } else {
                total_score as f64 / games.len() as f64
            },
            min_score: games.iter().map(|g| g.score).min().unwrap_or(0),
            max_score: games.iter().map(|g| g.score).max().unwrap_or(0),
            highest_tile: games.iter().map(|g| g.highest_tile).max().unwrap_or(0),
            tile_histogram,
        }
    }
}

/// Play one game from a fresh seeded engine until the policy runs out of
/// moves or `max_moves` effective moves have been made.
pub fn play_game(seed: u64, policy: PolicyKind, max_moves: Option<u64>) -> GameSummary {
    let mut engine = GridEngine::seeded(seed);
    let mut policy = policy.build(StdRng::seed_from_u64(seed ^ POLICY_SEED_SALT));
    let mut moves = 0u64;
    while max_moves.map_or(true, |cap| moves < cap) {
        let Some(dir) = policy.choose(&engine.board()) else {
            break;
        };
        if engine.step(dir).moved.changed {
            moves += 1;
        }
    }
    let summary = GameSummary {
        seed,
        moves,
        score: engine.score(),
        highest_tile: engine.board().highest_tile(),
        finished: engine.is_game_over(),
    };
    debug!("game {seed} done: {summary:?}");
    summary
}

/// Play `cfg.games` independent games in parallel; results are ordered by seed.
///
/// `on_game` is called once per finished game, from worker threads.
pub fn play_batch<F>(cfg: &AutoplayConfig, on_game: F) -> Vec<GameSummary>
where
    F: Fn(&GameSummary) + Sync,
{
    (0..cfg.games as u64)
        .into_par_iter()
        .map(|i| {
            let g = play_game(cfg.seed.wrapping_add(i), cfg.policy, cfg.max_moves);
            on_game(&g);
            g
        })
        .collect()
}
