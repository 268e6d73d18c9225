use log::{debug, info, trace};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::spawn::{spawn_into, TileSource};
use super::state::{Board, Move};
use super::{Score, CELLS, START_TILES, Tile};

/// Whether the game can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Result of resolving one directional move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    /// True iff any cell differs from before the move.
    pub changed: bool,
    /// Sum of the tiles created by merges during the move.
    pub score_delta: Score,
}

/// Result of a full move -> spawn -> game-over cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub moved: MoveResult,
    pub spawned: bool,
    pub status: GameStatus,
}

/// Owns one game: its board, its score and the random source used for spawns.
///
/// All mutation goes through `&mut self`; run one engine per game and share
/// nothing between them.
///
/// ```
/// use game_2048::engine::{GridEngine, Move, GameStatus};
///
/// let mut game = GridEngine::seeded(42);
/// assert_eq!(game.board().count_empty(), 14);
/// let step = game.step(Move::Left);
/// assert!(step.moved.changed || !step.spawned);
/// assert_eq!(step.status, GameStatus::Playing);
/// ```
#[derive(Debug, Clone)]
pub struct GridEngine<S = StdRng> {
    board: Board,
    score: Score,
    source: S,
}

impl GridEngine<StdRng> {
    /// New game driven by a `StdRng` seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// New game driven by an OS-seeded `StdRng`.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<S: TileSource> GridEngine<S> {
    /// Create an engine and start a new game (two spawned tiles).
    pub fn new(source: S) -> Self {
        let mut engine = Self::with_board(Board::EMPTY, source);
        engine.new_game();
        engine
    }

    /// Create an engine around an existing board with a zero score. No tiles
    /// are spawned.
    pub fn with_board(board: Board, source: S) -> Self {
        Self { board, score: 0, source }
    }

    /// Clear the board, reset the score, and spawn the starting tiles.
    pub fn new_game(&mut self) {
        self.board = Board::EMPTY;
        self.score = 0;
        for _ in 0..START_TILES {
            self.spawn();
        }
        debug!("new game: {:?}", self.board);
    }

    /// Slide and merge every line toward `direction`.
    ///
    /// A no-op reporting `changed = false` when the game is already over or
    /// when nothing can slide. Never spawns.
    pub fn apply_move(&mut self, direction: Move) -> MoveResult {
        if self.is_game_over() {
            return MoveResult::default();
        }
        let shifted = self.board.shift(direction);
        let changed = shifted.board != self.board;
        if !changed {
            return MoveResult::default();
        }
        self.board = shifted.board;
        self.score += shifted.score;
        trace!("move {direction}: +{} (score {})", shifted.score, self.score);
        MoveResult { changed, score_delta: shifted.score }
    }

    /// Place a 2 in a random empty cell. Returns false on a full board.
    pub fn spawn(&mut self) -> bool {
        spawn_into(&mut self.board, &mut self.source).is_some()
    }

    /// Apply `direction`, spawn if the board changed, then re-evaluate status.
    ///
    /// This is the unit callers should treat as atomic; intermediate boards
    /// are never observable through it.
    pub fn step(&mut self, direction: Move) -> StepResult {
        let moved = self.apply_move(direction);
        let spawned = moved.changed && self.spawn();
        let status = self.status();
        if moved.changed && status == GameStatus::GameOver {
            info!(
                "game over: score {}, highest tile {}",
                self.score,
                self.board.highest_tile()
            );
        }
        StepResult { moved, spawned, status }
    }

    /// True iff the board is full and no neighbouring tiles are equal.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn status(&self) -> GameStatus {
        if self.is_game_over() {
            GameStatus::GameOver
        } else {
            GameStatus::Playing
        }
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    /// Copy of the cells in row-major order.
    #[inline]
    pub fn snapshot(&self) -> [Tile; CELLS] {
        self.board.into_cells()
    }

    /// Copy of the current board.
    #[inline]
    pub fn board(&self) -> Board {
        self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ScriptedSource;

    fn engine(cells: [Tile; CELLS]) -> GridEngine<ScriptedSource> {
        let board = Board::from_cells(&cells).unwrap();
        GridEngine::with_board(board, ScriptedSource::new(0..CELLS))
    }

    fn row0(cells: [Tile; 4]) -> [Tile; CELLS] {
        let mut out = [0; CELLS];
        out[..4].copy_from_slice(&cells);
        out
    }

    const STUCK: [Tile; CELLS] = [
        2, 4, 2, 4, //
        4, 2, 4, 2, //
        2, 4, 2, 4, //
        4, 2, 4, 2,
    ];

    #[test]
    fn merge_left_adjacent_pair() {
        let mut g = engine(row0([2, 2, 0, 0]));
        let r = g.apply_move(Move::Left);
        assert_eq!(r, MoveResult { changed: true, score_delta: 4 });
        assert_eq!(g.snapshot(), row0([4, 0, 0, 0]));
        assert_eq!(g.score(), 4);
    }

    #[test]
    fn merge_right_across_gap() {
        let mut g = engine(row0([2, 0, 2, 0]));
        let r = g.apply_move(Move::Right);
        assert_eq!(r.score_delta, 4);
        assert_eq!(g.snapshot(), row0([0, 0, 0, 4]));
    }

    #[test]
    fn merge_left_far_apart() {
        let mut g = engine(row0([2, 0, 0, 2]));
        g.apply_move(Move::Left);
        assert_eq!(g.snapshot(), row0([4, 0, 0, 0]));
    }

    #[test]
    fn no_op_move_does_not_change_score() {
        let mut g = engine(row0([4, 2, 0, 0]));
        let r = g.apply_move(Move::Left);
        assert_eq!(r, MoveResult { changed: false, score_delta: 0 });
        assert_eq!(g.score(), 0);
        assert_eq!(g.snapshot(), row0([4, 2, 0, 0]));
    }

    #[test]
    fn repeated_moves_settle() {
        let mut g = engine(row0([2, 2, 4, 8]));
        assert!(g.apply_move(Move::Left).changed);
        assert_eq!(g.snapshot(), row0([4, 4, 8, 0]));
        // Merge products pair up again on the next move, never within one.
        assert_eq!(g.apply_move(Move::Left).score_delta, 8);
        assert_eq!(g.snapshot(), row0([8, 8, 0, 0]));
        assert_eq!(g.apply_move(Move::Left).score_delta, 16);
        assert!(!g.apply_move(Move::Left).changed);
        assert_eq!(g.snapshot(), row0([16, 0, 0, 0]));
        assert_eq!(g.score(), 28);
    }

    #[test]
    fn second_move_is_noop_without_new_pairs() {
        let mut g = engine(row0([2, 0, 4, 2]));
        assert!(g.apply_move(Move::Right).changed);
        assert_eq!(g.snapshot(), row0([0, 2, 4, 2]));
        assert!(!g.apply_move(Move::Right).changed);
    }

    #[test]
    fn stuck_board_is_game_over_and_rejects_moves() {
        let mut g = engine(STUCK);
        assert!(g.is_game_over());
        assert_eq!(g.status(), GameStatus::GameOver);
        for m in Move::ALL {
            assert!(!g.apply_move(m).changed);
            let step = g.step(m);
            assert!(!step.spawned);
            assert_eq!(step.status, GameStatus::GameOver);
        }
        assert_eq!(g.snapshot(), STUCK);
    }

    #[test]
    fn full_board_with_pair_is_not_over() {
        let mut cells = STUCK;
        cells[1] = 2;
        let mut g = engine(cells);
        assert!(!g.is_game_over());
        let r = g.apply_move(Move::Left);
        assert!(r.changed);
        assert_eq!(r.score_delta, 4);
    }

    #[test]
    fn spawn_on_full_board_is_noop() {
        let mut g = engine(STUCK);
        assert!(!g.spawn());
        assert_eq!(g.snapshot(), STUCK);
    }

    #[test]
    fn step_spawns_only_after_change() {
        let mut g = engine(row0([2, 0, 0, 0]));
        let step = g.step(Move::Left);
        assert!(!step.moved.changed);
        assert!(!step.spawned);
        assert_eq!(g.board().count_empty(), 15);

        let step = g.step(Move::Right);
        assert!(step.moved.changed);
        assert!(step.spawned);
        // Scripted source yields 0 first, which is empty after sliding right.
        assert_eq!(g.snapshot(), row0([2, 0, 0, 2]));
        assert_eq!(step.status, GameStatus::Playing);
    }

    #[test]
    fn step_into_game_over() {
        let mut cells = STUCK;
        cells[..4].copy_from_slice(&[4, 2, 4, 0]);
        let board = Board::from_cells(&cells).unwrap();
        let mut g = GridEngine::with_board(board, ScriptedSource::new([0]));
        assert_eq!(g.status(), GameStatus::Playing);
        let step = g.step(Move::Right);
        assert!(step.moved.changed);
        assert!(step.spawned);
        assert_eq!(g.snapshot(), STUCK);
        assert_eq!(step.status, GameStatus::GameOver);
        assert!(!g.apply_move(Move::Left).changed);
    }

    #[test]
    fn new_game_resets_board_and_score() {
        let mut g = engine(row0([2, 2, 0, 0]));
        g.apply_move(Move::Left);
        assert_eq!(g.score(), 4);
        g.new_game();
        assert_eq!(g.score(), 0);
        assert_eq!(g.board().count_empty(), CELLS - START_TILES);
        assert!(g.board().tiles().all(|v| v == 0 || v == 2));
    }

    #[test]
    fn seeded_engines_agree() {
        let mut a = GridEngine::seeded(9);
        let mut b = GridEngine::seeded(9);
        for m in [Move::Left, Move::Up, Move::Right, Move::Down, Move::Left] {
            assert_eq!(a.step(m), b.step(m));
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
