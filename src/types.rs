use serde::Serialize;

/// Disk color. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Index into `Board::disks`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A board coordinate, 1-indexed: row and col in `1..=8`.
///
/// Moves coming from outside the engine are built with [`Move::new`], which
/// rejects off-board coordinates. Moves the engine derives from a legal-move
/// mask are always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub row: i32,
    pub col: i32,
}

impl Move {
    /// Validating constructor for externally supplied coordinates.
    pub fn new(row: i32, col: i32) -> Result<Self, crate::error::MoveError> {
        let mv = Self { row, col };
        if crate::board::is_off_board(mv) {
            return Err(crate::error::MoveError::OffBoard { row, col });
        }
        Ok(mv)
    }
}

/// Snapshot of a game handed to whatever renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cells starting at (1,1): 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: Color,
    pub black_count: u32,
    pub white_count: u32,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: squares flipped by it.
    /// - Pass: must be an empty list.
    pub flipped: Vec<Move>,
}

/// Final result after game over. `winner` is `None` on a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Option<Color>,
    pub black_count: u32,
    pub white_count: u32,
}
