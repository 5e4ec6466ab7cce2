use thiserror::Error;

/// A move rejected at the input boundary. Never fatal; the caller may retry.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("move ({row},{col}) is off the board")]
    OffBoard { row: i32, col: i32 },

    #[error("square ({row},{col}) is already occupied")]
    Occupied { row: i32, col: i32 },

    #[error("move ({row},{col}) flips no disks")]
    NoFlips { row: i32, col: i32 },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,

    #[error("illegal move: {0}")]
    IllegalMove(#[from] MoveError),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
