// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, lexicon, movegen, player};

// The mutable shell a game loop drives: the current board generation,
// whose turn it is, and how many consecutive passes have happened.
pub struct GameState {
    pub grid: std::sync::Arc<board::Grid>,
    pub board: board::Board,
    pub turn: player::Player,
    pub num_passes: u16,
}

impl GameState {
    pub fn new(grid: &std::sync::Arc<board::Grid>) -> Self {
        Self {
            grid: std::sync::Arc::clone(grid),
            board: board::Board::new(grid),
            turn: player::Player::Blue,
            num_passes: 0,
        }
    }

    // Applies the capture for the player to move and retires the word
    // and its prefixes from the index.
    pub fn play(&mut self, lexicon: &mut lexicon::Lexicon, word: &[u8], mv: &movegen::Move) {
        self.board = self.board.capture(mv, self.turn);
        lexicon.retire(word);
        self.num_passes = 0;
    }

    pub fn pass(&mut self) {
        self.num_passes += 1;
    }

    pub fn next_turn(&mut self) {
        self.turn = self.turn.opponent();
    }

    // Passing is a normal outcome; two in a row end the game even on a
    // board that is not full.
    pub fn is_over(&self) -> bool {
        self.board.is_full() || self.num_passes >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix;
    use crate::player::Player;

    #[test]
    fn play_advances_generation_and_retires() {
        let grid = std::sync::Arc::new(
            board::Grid::from_layout(matrix::Dim { rows: 2, cols: 2 }, "a b\nc d\n").unwrap(),
        );
        let mut lexicon = lexicon::Lexicon::build_from_text("ab\ncd\n", &grid);
        let mut game_state = GameState::new(&grid);
        game_state.pass();
        game_state.next_turn();
        assert_eq!(game_state.turn, Player::Red);
        game_state.play(
            &mut lexicon,
            b"ab",
            &movegen::Move {
                tiles: [0, 1].into(),
            },
        );
        assert_eq!(game_state.board.score(), [0, 2]);
        assert_eq!(game_state.num_passes, 0); // playing resets the run of passes
        assert!(!lexicon.contains(b"ab"));
        assert!(lexicon.contains(b"cd"));
    }

    #[test]
    fn two_consecutive_passes_end_the_game() {
        let grid = std::sync::Arc::new(
            board::Grid::from_layout(matrix::Dim { rows: 2, cols: 2 }, "a b\nc d\n").unwrap(),
        );
        let mut game_state = GameState::new(&grid);
        assert!(!game_state.is_over());
        game_state.pass();
        game_state.next_turn();
        assert!(!game_state.is_over());
        game_state.pass();
        assert!(game_state.is_over());
    }
}
