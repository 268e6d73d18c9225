use log::trace;
use rand::Rng;

use super::state::Board;
use super::{CELLS, SPAWN_VALUE};

/// Source of cell indices for spawning tiles.
///
/// Any `rand::Rng` is a `TileSource`; tests can use [`ScriptedSource`] to pin
/// spawn placement exactly.
pub trait TileSource {
    /// Return an index in `0..bound`.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: Rng + ?Sized> TileSource for R {
    #[inline]
    fn next_index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// Replays a fixed sequence of indices, cycling when exhausted.
///
/// Each value is reduced modulo the requested bound. The sequence must
/// eventually name an empty cell, or spawning will not terminate.
///
/// ```
/// use game_2048::engine::{Board, ScriptedSource};
/// let mut src = ScriptedSource::new([5, 5, 9]);
/// let b = Board::EMPTY.with_spawned_tile(&mut src).unwrap();
/// // Second draw hits the occupied cell 5 and is rejected; 9 is accepted.
/// let b = b.with_spawned_tile(&mut src).unwrap();
/// assert_eq!((b.tile_value(5), b.tile_value(9)), (2, 2));
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    seq: Vec<usize>,
    pos: usize,
}

impl ScriptedSource {
    pub fn new(seq: impl IntoIterator<Item = usize>) -> Self {
        let seq: Vec<usize> = seq.into_iter().collect();
        assert!(!seq.is_empty(), "scripted source needs at least one index");
        Self { seq, pos: 0 }
    }

    /// Number of indices handed out so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl TileSource for ScriptedSource {
    fn next_index(&mut self, bound: usize) -> usize {
        let v = self.seq[self.pos % self.seq.len()];
        self.pos += 1;
        v % bound
    }
}

/// Rejection-sample an empty cell and place a spawn tile there.
///
/// Returns the chosen index, or `None` if the board has no empty cell.
pub(crate) fn spawn_into<S: TileSource + ?Sized>(board: &mut Board, source: &mut S) -> Option<usize> {
    if board.is_full() {
        return None;
    }
    loop {
        let idx = source.next_index(CELLS);
        if board.0[idx] == 0 {
            board.0[idx] = SPAWN_VALUE;
            trace!("spawned {SPAWN_VALUE} at {idx}");
            return Some(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn spawn_fills_board_then_stops() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut b = Board::EMPTY;
        for _ in 0..CELLS {
            b = b.with_spawned_tile(&mut rng).unwrap();
        }
        assert!(b.is_full());
        assert!(b.tiles().all(|v| v == SPAWN_VALUE));
        assert_eq!(b.with_spawned_tile(&mut rng), None);
    }

    #[test]
    fn scripted_source_rejects_occupied_cells() {
        let mut cells = [0; CELLS];
        cells[0] = 4;
        cells[1] = 8;
        let mut b = Board::from_cells(&cells).unwrap();
        let mut src = ScriptedSource::new([0, 1, 0, 3]);
        assert_eq!(spawn_into(&mut b, &mut src), Some(3));
        assert_eq!(src.draws(), 4);
        assert_eq!(b.tile_value(3), 2);
        assert_eq!(b.tile_value(0), 4);
    }

    #[test]
    fn scripted_source_wraps_bound() {
        let mut src = ScriptedSource::new([17]);
        assert_eq!(src.next_index(CELLS), 1);
        assert_eq!(src.next_index(CELLS), 1);
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let ba = Board::EMPTY.with_spawned_tile(&mut a).and_then(|x| x.with_spawned_tile(&mut a));
        let bb = Board::EMPTY.with_spawned_tile(&mut b).and_then(|x| x.with_spawned_tile(&mut b));
        assert_eq!(ba, bb);
    }
}
