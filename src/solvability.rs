//! Parity-based reachability test. With the blank pinned to one cell, legal
//! slides realize exactly the even permutations of the tiles, so two states
//! sharing a blank cell are mutually reachable exactly when the inversion
//! parities of their tile sequences agree.

use crate::board::Board;
use crate::fenwick::FenwickTree;

/// Inversion count of the tile sequence in row-major order, mod 2. The blank
/// label is skipped; each tile contributes the number of already-scanned
/// tiles with a larger label.
pub fn inversion_parity(board: &Board) -> u8 {
    let size = board.size();
    let blank = (size - 1) as u16;
    let mut tree = FenwickTree::new(size);
    let mut seen: u32 = 0;
    let mut inversions: u32 = 0;
    for key in 0..size {
        let label = board.label_at(key);
        if label == blank {
            continue;
        }
        inversions += seen - tree.sum_le(label as usize);
        tree.add(label as usize, 1);
        seen += 1;
    }
    (inversions & 1) as u8
}

/// True when `target` is reachable from `board` by legal slides.
///
/// Valid under the pinned-blank assumption: both states place the blank in
/// the last cell before any parity-fix swap is applied, which holds for
/// solved targets and for `Board::randomize` output. A relaxed blank
/// placement would additionally need the blank's taxicab displacement parity.
pub fn is_reachable(board: &Board, target: &Board) -> bool {
    board.width() == target.width()
        && board.height() == target.height()
        && board.parity() == target.parity()
}
