use super::state::{Board, Move, Shifted};
use super::{index, N, Score, Tile};

/// Slide/merge tiles in the given direction. No randomness.
///
/// Every row (Left/Right) or column (Up/Down) is pulled out as a line ordered
/// from the edge the tiles travel toward, resolved by [`slide_line`], and
/// written back in the same order.
pub fn shift(board: Board, direction: Move) -> Shifted {
    let mut cells = board.0;
    let mut score = 0;
    for k in 0..N {
        let idx = line_indices(direction, k);
        let mut line = idx.map(|i| cells[i]);
        score += slide_line(&mut line);
        for (&i, v) in idx.iter().zip(line) {
            cells[i] = v;
        }
    }
    Shifted { board: Board(cells), score }
}

/// Compact and merge one line toward index 0, returning the merge score.
///
/// Scanning from index 0, the first pair of equal neighbours (after gaps are
/// closed) merges; the merged tile takes no further part in this call, so
/// `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]` and `[4, 2, 2, 0]` becomes
/// `[4, 4, 0, 0]`.
///
/// ```
/// use game_2048::engine::slide_line;
/// let mut line = [2, 2, 2, 0];
/// assert_eq!(slide_line(&mut line), 4);
/// assert_eq!(line, [4, 2, 0, 0]);
/// ```
pub fn slide_line(line: &mut [Tile; N]) -> Score {
    let mut out = [0; N];
    let mut dst = 0;
    let mut score = 0;
    let mut pending: Option<Tile> = None;
    for v in line.iter().copied().filter(|&v| v != 0) {
        match pending {
            Some(p) if p == v => {
                out[dst] = p + v;
                score += Score::from(p + v);
                dst += 1;
                pending = None;
            }
            Some(p) => {
                out[dst] = p;
                dst += 1;
                pending = Some(v);
            }
            None => pending = Some(v),
        }
    }
    if let Some(p) = pending {
        out[dst] = p;
    }
    *line = out;
    score
}

/// Flat indices of line `k` for `direction`, starting at the destination edge.
pub(crate) fn line_indices(direction: Move, k: usize) -> [usize; N] {
    std::array::from_fn(|j| match direction {
        Move::Left => index(k, j),
        Move::Right => index(k, N - 1 - j),
        Move::Up => index(j, k),
        Move::Down => index(N - 1 - j, k),
    })
}

/// Count the number of empty (zero) cells.
pub fn count_empty(board: &Board) -> usize {
    board.0.iter().filter(|&&v| v == 0).count()
}

/// True if the board is full and no two horizontally or vertically adjacent
/// tiles hold the same value.
pub fn is_game_over(board: &Board) -> bool {
    count_empty(board) == 0 && !has_adjacent_pair(board)
}

fn has_adjacent_pair(board: &Board) -> bool {
    for row in 0..N {
        for col in 0..N {
            let v = board.get(row, col);
            if v == 0 {
                continue;
            }
            if col + 1 < N && board.get(row, col + 1) == v {
                return true;
            }
            if row + 1 < N && board.get(row + 1, col) == v {
                return true;
            }
        }
    }
    false
}
