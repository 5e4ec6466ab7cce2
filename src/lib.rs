//! Othello engine with a fork-join parallel negamax search.
//!
//! Boards are plain values. Every concurrent fan-out (the eight flip
//! directions, the 64-square legal-move scan, the children of a search node)
//! merges its task results through a monoid in [`reducer`], so results are
//! the same on any number of threads.

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod moves;
pub mod reducer;
pub mod types;

pub use ai::search::{BestMove, Engine, Played};
pub use board::Board;
pub use config::SearchConfig;
pub use game::Game;
pub use types::{Color, GameResult, GameState, Move};
