use std::fmt;

use crate::types::{Color, Move};

pub const BOARD_SIZE: i32 = 8;
pub const NUM_SQUARES: usize = 64;

/// Othello board as two disk masks, indexed by [`Color::index`].
///
/// Square (row, col) lives at bit `(8 - row) * 8 + (8 - col)`, so (1,1) is
/// bit 63 and (8,8) is bit 0. The two masks never share a bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    disks: [u64; 2],
}

impl Board {
    /// Creates the standard opening:
    /// (4,4)=white, (4,5)=black, (5,4)=black, (5,5)=white.
    pub fn new() -> Self {
        Self {
            disks: [
                board_bit(4, 5) | board_bit(5, 4),
                board_bit(4, 4) | board_bit(5, 5),
            ],
        }
    }

    /// Builds a board from raw masks. A square set in both masks is kept black.
    pub fn from_masks(black: u64, white: u64) -> Self {
        Self {
            disks: [black, white & !black],
        }
    }

    #[inline]
    pub fn disks(&self, color: Color) -> u64 {
        self.disks[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        self.disks[0] | self.disks[1]
    }

    #[inline]
    pub fn empty(&self) -> u64 {
        !self.occupied()
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u32, u32) {
        (
            count_bits(self, Color::Black),
            count_bits(self, Color::White),
        )
    }

    pub fn empty_count(&self) -> u32 {
        NUM_SQUARES as u32 - self.occupied().count_ones()
    }

    /// Color of the disk on `mv`, if any. Off-board squares read as empty.
    pub fn cell(&self, mv: Move) -> Option<Color> {
        if is_off_board(mv) {
            return None;
        }
        let bit = board_bit(mv.row, mv.col);
        if self.disks(Color::Black) & bit != 0 {
            Some(Color::Black)
        } else if self.disks(Color::White) & bit != 0 {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Places `color` on every square in `mask` and removes the opponent's disks there.
    #[inline]
    pub(crate) fn claim(&mut self, mask: u64, color: Color) {
        self.disks[color.index()] |= mask;
        self.disks[color.opponent().index()] &= !mask;
    }

    /// Row-major cells starting at (1,1): 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut cells = [0u8; NUM_SQUARES];
        for (i, cell) in cells.iter_mut().enumerate() {
            let mv = Move {
                row: i as i32 / BOARD_SIZE + 1,
                col: i as i32 % BOARD_SIZE + 1,
            };
            *cell = match self.cell(mv) {
                Some(Color::Black) => 1,
                Some(Color::White) => 2,
                None => 0,
            };
        }
        cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  1 2 3 4 5 6 7 8")?;
        for row in 1..=BOARD_SIZE {
            write!(f, "{row}")?;
            for col in 1..=BOARD_SIZE {
                let glyph = match self.cell(Move { row, col }) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, " {glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Bit position of (row, col). Caller guarantees the square is on the board.
#[inline]
pub const fn bit_index(row: i32, col: i32) -> u32 {
    ((BOARD_SIZE - row) * BOARD_SIZE + (BOARD_SIZE - col)) as u32
}

#[inline]
pub const fn board_bit(row: i32, col: i32) -> u64 {
    1u64 << bit_index(row, col)
}

/// Inverse of [`bit_index`].
#[inline]
pub const fn move_at(index: u32) -> Move {
    let index = index as i32;
    Move {
        row: BOARD_SIZE - index / BOARD_SIZE,
        col: BOARD_SIZE - index % BOARD_SIZE,
    }
}

#[inline]
pub fn is_off_board(mv: Move) -> bool {
    !(1..=BOARD_SIZE).contains(&mv.row) || !(1..=BOARD_SIZE).contains(&mv.col)
}

#[inline]
pub fn count_bits(board: &Board, color: Color) -> u32 {
    board.disks(color).count_ones()
}

/// Moves for every set bit of `mask`, in row-major order from (1,1).
pub fn moves_in_mask(mask: u64) -> Vec<Move> {
    let mut bits = mask;
    let mut out = Vec::with_capacity(mask.count_ones() as usize);
    while bits != 0 {
        let idx = 63 - bits.leading_zeros();
        out.push(move_at(idx));
        bits &= !(1u64 << idx);
    }
    out
}
