use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::ai::eval::evaluate;
use crate::board::Board;
use crate::config::SearchConfig;
use crate::error::EngineError;
use crate::moves::{apply_move, enumerate_legal_moves};
use crate::reducer::{BestOf, Max, Scored, fan_out};
use crate::types::{Color, Move};

/// Result of a root search: the chosen move and its negamax score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMove {
    pub mv: Move,
    pub score: i32,
}

/// A move the computer has played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Played {
    pub mv: Move,
    pub score: i32,
    /// Opponent disks turned over by the move.
    pub flipped: u64,
}

/// Full-width negamax. Each legal move is explored as its own task and the
/// child scores are folded with a max reducer after all of them join.
///
/// A side with no legal move passes; the pass costs one ply of `depth`.
pub fn negamax(board: &Board, color: Color, depth: u8) -> i32 {
    if depth == 0 {
        return evaluate(board, color);
    }

    let opponent = color.opponent();
    let legal = enumerate_legal_moves(board, color);
    if legal.is_empty() {
        if enumerate_legal_moves(board, opponent).is_empty() {
            return evaluate(board, color);
        }
        return -negamax(board, opponent, depth - 1);
    }

    fan_out::<Max, _, _>(legal.moves(), |mv| {
        let child = apply_move(mv, board, color);
        -negamax(&child, opponent, depth - 1)
    })
}

/// Root variant of [`negamax`] that also reports which move reached the best
/// score. Ties go to the move first in row-major order. Returns `None` only
/// when `color` has no legal move.
pub fn best_move(board: &Board, color: Color, depth: u8) -> Option<BestMove> {
    let legal = enumerate_legal_moves(board, color);
    if legal.is_empty() {
        log::debug!("{color:?} has no legal move");
        return None;
    }

    let opponent = color.opponent();
    let child_depth = depth.saturating_sub(1);
    let best = fan_out::<BestOf, _, _>(legal.moves(), |mv| {
        let child = apply_move(mv, board, color);
        Scored {
            score: -negamax(&child, opponent, child_depth),
            mv: Some(mv),
        }
    });

    let mv = best.mv?;
    log::debug!(
        "{color:?} depth {depth}: {} legal, best ({},{}) score {}",
        legal.count,
        mv.row,
        mv.col,
        best.score
    );
    Some(BestMove {
        mv,
        score: best.score,
    })
}

/// Searches for `color` and plays the result on `board`. Returns `None`
/// (a pass) when there is no legal move, leaving `board` unchanged.
pub fn computer_turn(board: &mut Board, color: Color, depth: u8) -> Option<Played> {
    let BestMove { mv, score } = best_move(board, color, depth)?;
    let before = *board;
    *board = apply_move(mv, &before, color);
    let flipped = board.disks(color) & before.disks(color.opponent());
    Some(Played { mv, score, flipped })
}

/// Search entry point bound to a configuration. With a configured thread
/// count every search runs inside its own rayon pool.
pub struct Engine {
    config: SearchConfig,
    pool: Option<ThreadPool>,
}

impl Engine {
    pub fn new(config: SearchConfig) -> Result<Self, EngineError> {
        let pool = match config.threads {
            Some(threads) => Some(ThreadPoolBuilder::new().num_threads(threads).build()?),
            None => None,
        };
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn negamax(&self, board: &Board, color: Color) -> i32 {
        self.run(|| negamax(board, color, self.config.depth))
    }

    pub fn best_move(&self, board: &Board, color: Color) -> Option<BestMove> {
        self.run(|| best_move(board, color, self.config.depth))
    }

    pub fn computer_turn(&self, board: &mut Board, color: Color) -> Option<Played> {
        self.run(|| computer_turn(board, color, self.config.depth))
    }

    fn run<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::board_bit;
    use crate::moves::enumerate_legal_moves_seq;
    use crate::reducer::SCORE_FLOOR;
    use proptest::prelude::*;

    const FULL_BOARD: u64 = u64::MAX;

    fn mv(row: i32, col: i32) -> Move {
        Move { row, col }
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        (any::<u64>(), any::<u64>(), any::<u64>()).prop_map(|(black, white, holes)| {
            let black = black & holes;
            let white = white & holes & !black;
            Board::from_masks(black, white)
        })
    }

    /// Single-threaded negamax built from plain iterators.
    fn negamax_seq(board: &Board, color: Color, depth: u8) -> i32 {
        if depth == 0 {
            return evaluate(board, color);
        }
        let opponent = color.opponent();
        let legal = enumerate_legal_moves_seq(board, color);
        if legal.is_empty() {
            if enumerate_legal_moves_seq(board, opponent).is_empty() {
                return evaluate(board, color);
            }
            return -negamax_seq(board, opponent, depth - 1);
        }
        legal
            .moves()
            .into_iter()
            .map(|mv| -negamax_seq(&apply_move(mv, board, color), opponent, depth - 1))
            .max()
            .unwrap()
    }

    /// Black has no move; white can take (1,1).
    fn black_must_pass() -> Board {
        let black = board_bit(1, 2);
        let white = FULL_BOARD ^ board_bit(1, 1) ^ black;
        Board::from_masks(black, white)
    }

    #[test]
    fn depth_one_from_opening_picks_first_of_four_equal_moves() {
        let best = best_move(&Board::new(), Color::Black, 1).unwrap();

        assert_eq!(best.mv, mv(3, 4));
        assert_eq!(best.score, 3);
        assert_eq!(negamax(&Board::new(), Color::Black, 1), 3);
    }

    #[test]
    fn depth_zero_root_scores_children_statically() {
        let best = best_move(&Board::new(), Color::Black, 0).unwrap();

        assert_eq!(best.score, 3);
        assert_eq!(negamax(&Board::new(), Color::Black, 0), 0);
    }

    #[test]
    fn parallel_search_matches_sequential_reference() {
        let board = Board::new();
        for depth in 1..=4 {
            assert_eq!(
                negamax(&board, Color::Black, depth),
                negamax_seq(&board, Color::Black, depth),
                "depth {depth}"
            );
        }
    }

    #[test]
    fn pass_costs_one_ply_and_flips_the_side() {
        let board = black_must_pass();

        assert!(enumerate_legal_moves(&board, Color::Black).is_empty());
        assert_eq!(
            negamax(&board, Color::Black, 2),
            -negamax(&board, Color::White, 1)
        );
        // White takes (1,1) flipping (1,2): the board is all white.
        assert_eq!(negamax(&board, Color::White, 1), 64);
        assert_eq!(negamax(&board, Color::Black, 2), -64);
    }

    #[test]
    fn game_over_position_is_evaluated_at_any_depth() {
        let board = Board::from_masks(FULL_BOARD ^ board_bit(1, 1), 0);

        for depth in 0..=3 {
            assert_eq!(negamax(&board, Color::White, depth), -63);
        }
        assert_eq!(best_move(&board, Color::Black, 3), None);
    }

    #[test]
    fn computer_turn_plays_and_reports_flips() {
        let mut board = Board::new();

        let played = computer_turn(&mut board, Color::Black, 1).unwrap();

        assert_eq!(played.mv, mv(3, 4));
        assert_eq!(played.flipped, board_bit(4, 4));
        assert_eq!(board.count(), (4, 1));
    }

    #[test]
    fn computer_turn_passes_without_touching_the_board() {
        let mut board = black_must_pass();
        let before = board;

        assert_eq!(computer_turn(&mut board, Color::Black, 3), None);
        assert_eq!(board, before);
    }

    #[test]
    fn engine_pool_gives_the_same_answer() {
        let board = apply_move(mv(3, 4), &Board::new(), Color::Black);
        let single = Engine::new(SearchConfig::with_depth(3).threads(1)).unwrap();
        let wide = Engine::new(SearchConfig::with_depth(3).threads(4)).unwrap();

        assert_eq!(single.config().depth, 3);
        assert_eq!(wide.config().threads, Some(4));
        assert_eq!(single.best_move(&board, Color::White), wide.best_move(&board, Color::White));
        assert_eq!(single.negamax(&board, Color::White), negamax_seq(&board, Color::White, 3));
    }

    proptest! {
        #[test]
        fn depth_zero_is_the_static_evaluation(board in arb_board(), white in any::<bool>()) {
            let color = if white { Color::White } else { Color::Black };
            prop_assert_eq!(negamax(&board, color, 0), evaluate(&board, color));
        }

        #[test]
        fn best_move_exists_whenever_a_move_is_legal(board in arb_board(), white in any::<bool>()) {
            let color = if white { Color::White } else { Color::Black };
            let legal = enumerate_legal_moves(&board, color);
            let best = best_move(&board, color, 1);

            match best {
                Some(best) => {
                    prop_assert!(legal.count > 0);
                    prop_assert_ne!(legal.mask & board_bit(best.mv.row, best.mv.col), 0);
                    prop_assert!(best.score > SCORE_FLOOR);
                }
                None => {
                    prop_assert_eq!(legal.count, 0);
                }
            }
        }
    }
}
