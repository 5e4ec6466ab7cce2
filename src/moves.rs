use crate::board::{Board, board_bit, is_off_board, move_at};
use crate::reducer::{BitOr, Sum, fan_out};
use crate::types::{Color, Move};

/// (row, col) steps for the eight compass directions.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, 1),
    (1, -1),
];

const ROW_1: u64 = 0xFF00_0000_0000_0000;
const ROW_8: u64 = 0x0000_0000_0000_00FF;
const COL_1: u64 = 0x8080_8080_8080_8080;
const COL_8: u64 = 0x0101_0101_0101_0101;

/// Legal moves for one side: the move mask and its population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LegalMoves {
    pub mask: u64,
    pub count: u32,
}

impl LegalMoves {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn moves(&self) -> Vec<Move> {
        crate::board::moves_in_mask(self.mask)
    }
}

/// Walks from `origin` along `offset` over opponent disks.
///
/// Returns 0 when the walk leaves the board or reaches an empty square before
/// a disk of `color`; otherwise 1 + the number of opponent disks in the run.
pub fn try_flips_in_direction(origin: Move, offset: (i32, i32), board: &Board, color: Color) -> u32 {
    match flip_run(origin, offset, board, color) {
        0 => 0,
        run => run.count_ones() + 1,
    }
}

/// Mask of the opponent run from `origin` along `offset` closed by a disk of
/// `color`, or 0 when there is none.
fn flip_run(origin: Move, offset: (i32, i32), board: &Board, color: Color) -> u64 {
    let own = board.disks(color);
    let opp = board.disks(color.opponent());
    let mut run = 0u64;
    let mut square = Move {
        row: origin.row + offset.0,
        col: origin.col + offset.1,
    };

    while !is_off_board(square) {
        let bit = board_bit(square.row, square.col);
        if opp & bit != 0 {
            run |= bit;
        } else if own & bit != 0 {
            return run;
        } else {
            return 0;
        }
        square.row += offset.0;
        square.col += offset.1;
    }

    0
}

/// Counts the disks `color` would flip by playing `mv`, scanning the eight
/// directions as concurrent tasks. With `apply_flips` the flipped disks are
/// turned over on `board`; otherwise `board` is left untouched.
///
/// Does not place the disk on `mv` itself; see [`apply_move`].
pub fn flip_disks(mv: Move, board: &mut Board, color: Color, apply_flips: bool) -> u32 {
    let (mask, count) = scan_flips(mv, board, color);
    if apply_flips && mask != 0 {
        board.claim(mask, color);
    }
    count
}

/// Read-only half of [`flip_disks`]: the union of the eight direction runs
/// and the total number of disks in them.
pub fn scan_flips(mv: Move, board: &Board, color: Color) -> (u64, u32) {
    fan_out::<(BitOr, Sum), _, _>(DIRECTIONS, |offset| {
        let run = flip_run(mv, offset, board, color);
        let found = match run {
            0 => 0,
            run => run.count_ones() + 1,
        };
        // A failed direction reports 0, not -1.
        (run, found.saturating_sub(1))
    })
}

/// Shifts every square of `bits` one step along `offset`, dropping squares
/// that would leave the board instead of wrapping to the next row.
#[inline]
fn shift(bits: u64, offset: (i32, i32)) -> u64 {
    let (dr, dc) = offset;
    let mut guarded = bits;
    if dr < 0 {
        guarded &= !ROW_1;
    } else if dr > 0 {
        guarded &= !ROW_8;
    }
    if dc < 0 {
        guarded &= !COL_1;
    } else if dc > 0 {
        guarded &= !COL_8;
    }
    // Moving down a row or right a column lowers the bit index.
    let delta = -(dr * 8 + dc);
    if delta >= 0 {
        guarded << delta
    } else {
        guarded >> -delta
    }
}

/// Empty squares touching at least one opponent disk. Every legal move for
/// `color` is among them.
pub fn neighbor_candidates(board: &Board, color: Color) -> u64 {
    let opp = board.disks(color.opponent());
    let touched = DIRECTIONS
        .iter()
        .fold(0u64, |acc, &offset| acc | shift(opp, offset));
    touched & board.empty()
}

/// Tests all 64 squares as concurrent tasks. A candidate square is legal when
/// probing it flips at least one disk. The move mask and the move count are
/// reduced side by side, so the result matches a sequential scan on any pool.
pub fn enumerate_legal_moves(board: &Board, color: Color) -> LegalMoves {
    let candidates = neighbor_candidates(board, color);
    let (mask, count) = fan_out::<(BitOr, Sum), _, _>(0..64u32, |index| {
        probe_square(index, candidates, board, color)
    });
    LegalMoves { mask, count }
}

/// Same scan as [`enumerate_legal_moves`] on the calling thread only.
pub fn enumerate_legal_moves_seq(board: &Board, color: Color) -> LegalMoves {
    let candidates = neighbor_candidates(board, color);
    let (mask, count) = crate::reducer::fold_seq::<(BitOr, Sum), _, _>(0..64u32, |index| {
        probe_square(index, candidates, board, color)
    });
    LegalMoves { mask, count }
}

fn probe_square(index: u32, candidates: u64, board: &Board, color: Color) -> (u64, u32) {
    let bit = 1u64 << index;
    if candidates & bit == 0 {
        return (0, 0);
    }
    let (_, flips) = scan_flips(move_at(index), board, color);
    if flips > 0 { (bit, 1) } else { (0, 0) }
}

/// Plays `mv` for `color` and returns the resulting board. The caller has
/// already checked that the move is legal.
pub fn apply_move(mv: Move, board: &Board, color: Color) -> Board {
    let mut next = *board;
    next.claim(board_bit(mv.row, mv.col), color);
    flip_disks(mv, &mut next, color, true);
    log::trace!("{color:?} plays ({},{})", mv.row, mv.col);
    next
}
