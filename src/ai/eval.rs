use crate::board::{Board, count_bits};
use crate::types::Color;

/// Disk differential from `color`'s point of view, in `-64..=64`.
#[inline]
pub fn evaluate(board: &Board, color: Color) -> i32 {
    count_bits(board, color) as i32 - count_bits(board, color.opponent()) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::board_bit;

    #[test]
    fn opening_is_even() {
        let board = Board::new();

        assert_eq!(evaluate(&board, Color::Black), 0);
        assert_eq!(evaluate(&board, Color::White), 0);
    }

    #[test]
    fn evaluation_is_antisymmetric() {
        let board = Board::from_masks(board_bit(1, 1) | board_bit(2, 2) | board_bit(3, 3), board_bit(8, 8));

        assert_eq!(evaluate(&board, Color::Black), 2);
        assert_eq!(evaluate(&board, Color::White), -2);
    }

    #[test]
    fn full_board_is_bounded() {
        let board = Board::from_masks(u64::MAX, 0);

        assert_eq!(evaluate(&board, Color::Black), 64);
        assert_eq!(evaluate(&board, Color::White), -64);
    }
}
