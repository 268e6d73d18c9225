//! Move-selection policies used by the self-play driver.
//!
//! Every policy shares one surface: given a board, return a direction that
//! changes it, or `None` when no such direction exists.
//!
//! ```
//! use game_2048::engine::GridEngine;
//! use game_2048::policy::{GreedyPolicy, Policy};
//!
//! let mut game = GridEngine::seeded(3);
//! let mut policy = GreedyPolicy;
//! while let Some(dir) = policy.choose(&game.board()) {
//!     game.step(dir);
//! }
//! assert!(game.is_game_over());
//! ```

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{Board, Move};

pub trait Policy {
    fn choose(&mut self, board: &Board) -> Option<Move>;
}

/// Uniformly random among the moves that change the board.
pub struct RandomPolicy<R> {
    rng: R,
}

impl<R: Rng> RandomPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Policy for RandomPolicy<R> {
    fn choose(&mut self, board: &Board) -> Option<Move> {
        board.legal_moves().choose(&mut self.rng).copied()
    }
}

/// Highest immediate merge score; ties go to the earlier entry of `Move::ALL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

impl Policy for GreedyPolicy {
    fn choose(&mut self, board: &Board) -> Option<Move> {
        let mut best: Option<(Move, u64)> = None;
        for m in Move::ALL {
            let shifted = board.shift(m);
            if shifted.board == *board {
                continue;
            }
            if best.map_or(true, |(_, s)| shifted.score > s) {
                best = Some((m, shifted.score));
            }
        }
        best.map(|(m, _)| m)
    }
}

/// Rotates Up, Right, Down, Left, skipping directions that change nothing.
#[derive(Debug, Clone, Default)]
pub struct CyclePolicy {
    next: usize,
}

impl CyclePolicy {
    const ORDER: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];
}

impl Policy for CyclePolicy {
    fn choose(&mut self, board: &Board) -> Option<Move> {
        for _ in 0..Self::ORDER.len() {
            let m = Self::ORDER[self.next];
            self.next = (self.next + 1) % Self::ORDER.len();
            if board.can_move(m) {
                return Some(m);
            }
        }
        None
    }
}

/// Policy selector for configuration and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Random,
    Greedy,
    Cycle,
}

impl PolicyKind {
    /// Build a boxed policy; `rng` is only consumed by `Random`.
    pub fn build<R: Rng + 'static>(self, rng: R) -> Box<dyn Policy> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::new(rng)),
            PolicyKind::Greedy => Box::new(GreedyPolicy),
            PolicyKind::Cycle => Box::new(CyclePolicy::default()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PolicyKind::Random => "random",
            PolicyKind::Greedy => "greedy",
            PolicyKind::Cycle => "cycle",
        };
        f.write_str(s)
    }
}

impl FromStr for PolicyKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(PolicyKind::Random),
            "greedy" => Ok(PolicyKind::Greedy),
            "cycle" => Ok(PolicyKind::Cycle),
            other => Err(format!("unknown policy: {other}")),
        }
    }
}
