use crate::ai::search::{Engine, Played};
use crate::board::{Board, moves_in_mask};
use crate::config::SearchConfig;
use crate::error::{EngineError, GameError, MoveError};
use crate::moves::{apply_move, enumerate_legal_moves, scan_flips};
use crate::types::{Color, GameResult, GameState, Move};

/// A game in progress: the board, whose turn it is, and what the last
/// action did.
pub struct Game {
    board: Board,
    pub current_player: Color,
    pub is_game_over: bool,
    pub is_pass: bool,
    pub flipped: Vec<Move>,
    engine: Engine,
}

impl Game {
    pub fn new(config: SearchConfig) -> Result<Self, EngineError> {
        Ok(Self::with_board(Board::new(), Color::Black, Engine::new(config)?))
    }

    pub fn with_board(board: Board, to_move: Color, engine: Engine) -> Self {
        let mut game = Self {
            board,
            current_player: to_move,
            is_game_over: false,
            is_pass: false,
            flipped: Vec::new(),
            engine,
        };
        game.refresh_game_over();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Human move for the side to move. Returns the number of disks flipped.
    pub fn place(&mut self, row: i32, col: i32) -> Result<u32, GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }

        let mv = Move::new(row, col)?;
        if self.board.cell(mv).is_some() {
            return Err(MoveError::Occupied { row, col }.into());
        }
        let (_, flips) = scan_flips(mv, &self.board, self.current_player);
        if flips == 0 {
            return Err(MoveError::NoFlips { row, col }.into());
        }

        let color = self.current_player;
        let before = self.board;
        self.board = apply_move(mv, &before, color);
        self.record_move(color, self.board.disks(color) & before.disks(color.opponent()));
        log::info!("{color:?} (human) plays ({row},{col}), {flips} flipped");
        Ok(flips)
    }

    /// Lets the engine play for the side to move. `Ok(None)` means it had to pass.
    pub fn computer_turn(&mut self) -> Result<Option<Played>, GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        Ok(self.turn_for(self.current_player))
    }

    /// Computer turn for `color`, whoever was on move. Passes when `color`
    /// has no legal move; does nothing once the game is over.
    fn turn_for(&mut self, color: Color) -> Option<Played> {
        if self.is_game_over {
            return None;
        }
        self.current_player = color;
        match self.engine.computer_turn(&mut self.board, color) {
            Some(played) => {
                log::info!(
                    "{color:?} plays ({},{}) score {} at depth {}, {} flipped",
                    played.mv.row,
                    played.mv.col,
                    played.score,
                    self.engine.config().depth,
                    played.flipped.count_ones()
                );
                self.record_move(color, played.flipped);
                Some(played)
            }
            None => {
                self.pass();
                None
            }
        }
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        !enumerate_legal_moves(&self.board, self.current_player).is_empty()
    }

    pub fn pass(&mut self) {
        log::info!("{:?} passes", self.current_player);
        self.is_pass = true;
        self.flipped.clear();
        self.current_player = self.current_player.opponent();
        self.refresh_game_over();
    }

    pub fn end_game(&mut self) {
        self.is_game_over = true;
    }

    /// Computer plays both sides, Black then White each round, until a round
    /// in which neither side could move.
    pub fn play_out(&mut self) -> GameResult {
        self.play_out_with(|_, _| {})
    }

    /// [`Game::play_out`] calling `on_move` after every move played.
    pub fn play_out_with<F>(&mut self, mut on_move: F) -> GameResult
    where
        F: FnMut(&Game, &Played),
    {
        while !self.is_game_over {
            let black = self.turn_for(Color::Black);
            if let Some(played) = &black {
                on_move(self, played);
            }
            let white = self.turn_for(Color::White);
            if let Some(played) = &white {
                on_move(self, played);
            }
            if black.is_none() && white.is_none() {
                self.end_game();
            }
        }
        self.to_game_result()
    }

    pub fn get_legal_moves(&self) -> Vec<Move> {
        enumerate_legal_moves(&self.board, self.current_player).moves()
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player,
            black_count,
            white_count,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (black_count, white_count) = self.board.count();
        GameResult {
            winner: if black_count > white_count {
                Some(Color::Black)
            } else if white_count > black_count {
                Some(Color::White)
            } else {
                None
            },
            black_count,
            white_count,
        }
    }

    fn record_move(&mut self, color: Color, flipped: u64) {
        self.is_pass = false;
        self.flipped = moves_in_mask(flipped);
        self.current_player = color.opponent();
        self.refresh_game_over();
    }

    fn refresh_game_over(&mut self) {
        if enumerate_legal_moves(&self.board, Color::Black).is_empty()
            && enumerate_legal_moves(&self.board, Color::White).is_empty()
        {
            self.end_game();
        }
    }
}
