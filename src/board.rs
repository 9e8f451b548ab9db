// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, matrix, movegen, player};
use rand::prelude::*;

pub static STANDARD_DIM: matrix::Dim = matrix::Dim { rows: 5, cols: 5 };

// english-like distribution for random boards, a..z
static LETTER_FREQS: [u8; 26] = [
    9, 2, 2, 4, 12, 2, 3, 2, 9, 1, 1, 4, 2, 6, 8, 2, 1, 6, 4, 6, 4, 2, 2, 1, 2, 1,
];

// row, col deltas of the four orthogonal neighbors
static NEIGHBORS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

// The tile grid is fixed for the whole game, only ownership changes.
pub struct Grid {
    dim: matrix::Dim,
    letters: Box<[u8]>, // b'a'..=b'z', row-major
    letter_tally: [u8; 26],
    tiles_by_letter: Box<[Box<[u8]>]>, // 26 entries of tile ids
}

impl Grid {
    fn from_letters(dim: matrix::Dim, letters: Vec<u8>) -> Grid {
        let mut letter_tally = [0u8; 26];
        let mut tiles_by_letter = vec![Vec::new(); 26];
        for (tile, &letter) in letters.iter().enumerate() {
            letter_tally[(letter - b'a') as usize] += 1;
            tiles_by_letter[(letter - b'a') as usize].push(tile as u8);
        }
        Grid {
            dim,
            letters: letters.into_boxed_slice(),
            letter_tally,
            tiles_by_letter: tiles_by_letter
                .into_iter()
                .map(|v| v.into_boxed_slice())
                .collect(),
        }
    }

    pub fn from_layout(dim: matrix::Dim, text: &str) -> error::Returns<Grid> {
        if dim.area() > 64 {
            return_error!(format!(
                "{}x{} board exceeds 64 tiles",
                dim.rows, dim.cols
            ));
        }
        let mut letters = Vec::with_capacity(dim.area());
        let mut num_rows = 0i8;
        for line in text.lines() {
            let mut num_cols = 0i8;
            for token in line.split_whitespace() {
                let token_bytes = token.as_bytes();
                if token_bytes.len() != 1 || !token_bytes[0].is_ascii_alphabetic() {
                    return_error!(format!("invalid tile {:?} in row {}", token, num_rows + 1));
                }
                if num_rows < dim.rows && num_cols < dim.cols {
                    letters.push(token_bytes[0].to_ascii_lowercase());
                }
                num_cols += 1;
            }
            if num_cols != dim.cols {
                return_error!(format!(
                    "row {} has {} tiles, expected {}",
                    num_rows + 1,
                    num_cols,
                    dim.cols
                ));
            }
            num_rows += 1;
        }
        if num_rows != dim.rows {
            return_error!(format!("{} rows, expected {}", num_rows, dim.rows));
        }
        Ok(Grid::from_letters(dim, letters))
    }

    pub fn random(dim: matrix::Dim, rng: &mut dyn RngCore) -> error::Returns<Grid> {
        if dim.area() > 64 {
            return_error!(format!(
                "{}x{} board exceeds 64 tiles",
                dim.rows, dim.cols
            ));
        }
        let mut pool = Vec::with_capacity(
            LETTER_FREQS.iter().map(|&freq| freq as usize).sum::<usize>(),
        );
        for (i, &freq) in LETTER_FREQS.iter().enumerate() {
            for _ in 0..freq {
                pool.push(b'a' + i as u8);
            }
        }
        let letters = (0..dim.area())
            .map(|_| *pool.choose(rng).unwrap())
            .collect::<Vec<_>>();
        Ok(Grid::from_letters(dim, letters))
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn letters(&self) -> &[u8] {
        &self.letters
    }

    #[inline(always)]
    pub fn letter(&self, tile: u8) -> u8 {
        self.letters[tile as usize]
    }

    #[inline(always)]
    pub fn letter_tally(&self) -> &[u8; 26] {
        &self.letter_tally
    }

    // tile ids bearing the given letter, in row-major order
    #[inline(always)]
    pub fn tiles_with(&self, letter: u8) -> &[u8] {
        &self.tiles_by_letter[(letter - b'a') as usize]
    }
}

// One ownership generation. Mutating operations return a new generation
// sharing the grid; the defense caches belong to a single generation and
// are never carried across a capture.
pub struct Board {
    grid: std::sync::Arc<Grid>,
    owners: Box<[Option<player::Player>]>,
    defended: std::cell::OnceCell<Box<[bool]>>,
    well_defended: std::cell::OnceCell<Box<[bool]>>,
}

impl Clone for Board {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            grid: std::sync::Arc::clone(&self.grid),
            owners: self.owners.clone(),
            defended: self.defended.clone(),
            well_defended: self.well_defended.clone(),
        }
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.grid = std::sync::Arc::clone(&source.grid);
        self.owners.clone_from(&source.owners);
        self.defended.clone_from(&source.defended);
        self.well_defended.clone_from(&source.well_defended);
    }
}

impl Board {
    pub fn new(grid: &std::sync::Arc<Grid>) -> Board {
        Board {
            grid: std::sync::Arc::clone(grid),
            owners: vec![None; grid.dim().area()].into_boxed_slice(),
            defended: std::cell::OnceCell::new(),
            well_defended: std::cell::OnceCell::new(),
        }
    }

    // rows of '.' (unowned), 'b', 'r' tokens, same shape as the layout
    pub fn parse_owners(grid: &std::sync::Arc<Grid>, text: &str) -> error::Returns<Board> {
        let dim = grid.dim();
        let mut owners = Vec::with_capacity(dim.area());
        let mut num_rows = 0i8;
        for line in text.lines() {
            let mut num_cols = 0i8;
            for token in line.split_whitespace() {
                match token {
                    "." | "-" => owners.push(None),
                    "b" => owners.push(Some(player::Player::Blue)),
                    "r" => owners.push(Some(player::Player::Red)),
                    _ => {
                        return_error!(format!("invalid owner {:?} in row {}", token, num_rows + 1))
                    }
                }
                num_cols += 1;
            }
            if num_cols != dim.cols {
                return_error!(format!(
                    "row {} has {} owners, expected {}",
                    num_rows + 1,
                    num_cols,
                    dim.cols
                ));
            }
            num_rows += 1;
        }
        if num_rows != dim.rows {
            return_error!(format!("{} rows, expected {}", num_rows, dim.rows));
        }
        Ok(Board {
            grid: std::sync::Arc::clone(grid),
            owners: owners.into_boxed_slice(),
            defended: std::cell::OnceCell::new(),
            well_defended: std::cell::OnceCell::new(),
        })
    }

    #[inline(always)]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn owner(&self, row: i8, col: i8) -> Option<player::Player> {
        assert!(self.grid.dim().is_within(row, col));
        self.owners[self.grid.dim().at_row_col(row, col)]
    }

    #[inline(always)]
    pub fn owner_of_tile(&self, tile: u8) -> Option<player::Player> {
        self.owners[tile as usize]
    }

    // a tile is defended iff owned and every in-bounds orthogonal neighbor
    // has the same owner, so edge and corner tiles are easier to defend
    fn defended_cache(&self) -> &[bool] {
        self.defended.get_or_init(|| {
            let dim = self.grid.dim();
            let mut defended = vec![false; dim.area()];
            for row in 0..dim.rows {
                for col in 0..dim.cols {
                    let idx = dim.at_row_col(row, col);
                    let owner = match self.owners[idx] {
                        Some(owner) => owner,
                        None => continue,
                    };
                    defended[idx] = NEIGHBORS.iter().all(|&(dr, dc)| {
                        !dim.is_within(row + dr, col + dc)
                            || self.owners[dim.at_row_col(row + dr, col + dc)] == Some(owner)
                    });
                }
            }
            defended.into_boxed_slice()
        })
    }

    // defended, and every in-bounds neighbor also defended by the same owner
    fn well_defended_cache(&self) -> &[bool] {
        self.well_defended.get_or_init(|| {
            let defended = self.defended_cache();
            let dim = self.grid.dim();
            let mut well_defended = vec![false; dim.area()];
            for row in 0..dim.rows {
                for col in 0..dim.cols {
                    let idx = dim.at_row_col(row, col);
                    if !defended[idx] {
                        continue;
                    }
                    well_defended[idx] = NEIGHBORS.iter().all(|&(dr, dc)| {
                        !dim.is_within(row + dr, col + dc) || {
                            let nidx = dim.at_row_col(row + dr, col + dc);
                            defended[nidx] && self.owners[nidx] == self.owners[idx]
                        }
                    });
                }
            }
            well_defended.into_boxed_slice()
        })
    }

    pub fn is_defended(&self, row: i8, col: i8) -> bool {
        assert!(self.grid.dim().is_within(row, col));
        self.defended_cache()[self.grid.dim().at_row_col(row, col)]
    }

    pub fn is_well_defended(&self, row: i8, col: i8) -> bool {
        assert!(self.grid.dim().is_within(row, col));
        self.well_defended_cache()[self.grid.dim().at_row_col(row, col)]
    }

    // Defense is evaluated for every move tile against this generation,
    // then all ownership changes apply at once into the new generation.
    pub fn capture(&self, mv: &movegen::Move, player: player::Player) -> Board {
        let defended = self.defended_cache();
        let mut owners = self.owners.clone();
        for &tile in mv.tiles.iter() {
            if !defended[tile as usize] {
                owners[tile as usize] = Some(player);
            }
        }
        Board {
            grid: std::sync::Arc::clone(&self.grid),
            owners,
            defended: std::cell::OnceCell::new(),
            well_defended: std::cell::OnceCell::new(),
        }
    }

    pub fn score(&self) -> [i16; 2] {
        let mut counts = [0i16; 2];
        for owner in self.owners.iter() {
            if let Some(player) = owner {
                counts[player.index()] += 1;
            }
        }
        counts
    }

    pub fn num_defended(&self) -> [i16; 2] {
        let defended = self.defended_cache();
        let mut counts = [0i16; 2];
        for (idx, owner) in self.owners.iter().enumerate() {
            if let Some(player) = owner {
                if defended[idx] {
                    counts[player.index()] += 1;
                }
            }
        }
        counts
    }

    pub fn num_well_defended(&self) -> [i16; 2] {
        let well_defended = self.well_defended_cache();
        let mut counts = [0i16; 2];
        for (idx, owner) in self.owners.iter().enumerate() {
            if let Some(player) = owner {
                if well_defended[idx] {
                    counts[player.index()] += 1;
                }
            }
        }
        counts
    }

    pub fn is_full(&self) -> bool {
        self.owners.iter().all(|owner| owner.is_some())
    }

    pub fn free_letter_tally(&self) -> [u8; 26] {
        let mut tally = [0u8; 26];
        for (idx, owner) in self.owners.iter().enumerate() {
            if owner.is_none() {
                tally[(self.grid.letters[idx] - b'a') as usize] += 1;
            }
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;

    fn grid_2x2() -> std::sync::Arc<Grid> {
        std::sync::Arc::new(
            Grid::from_layout(matrix::Dim { rows: 2, cols: 2 }, "a b\nc d\n").unwrap(),
        )
    }

    fn grid_3x3() -> std::sync::Arc<Grid> {
        std::sync::Arc::new(
            Grid::from_layout(matrix::Dim { rows: 3, cols: 3 }, "a b c\nd e f\ng h i\n").unwrap(),
        )
    }

    fn mv(tiles: &[u8]) -> movegen::Move {
        movegen::Move {
            tiles: tiles.into(),
        }
    }

    #[test]
    fn layout_parsing() {
        let grid = grid_2x2();
        assert_eq!(grid.letters(), b"abcd");
        assert_eq!(grid.letter_tally()[0], 1);
        assert_eq!(grid.tiles_with(b'c'), &[2]);
    }

    #[test]
    fn layout_case_folds() {
        let grid =
            Grid::from_layout(matrix::Dim { rows: 2, cols: 2 }, "A b\nC d\n").unwrap();
        assert_eq!(grid.letters(), b"abcd");
    }

    #[test]
    fn malformed_layouts_fail() {
        let dim = matrix::Dim { rows: 2, cols: 2 };
        assert!(Grid::from_layout(dim, "a b\n").is_err()); // missing row
        assert!(Grid::from_layout(dim, "a b c\nc d\n").is_err()); // extra column
        assert!(Grid::from_layout(dim, "a b\nc d\ne f\n").is_err()); // extra row
        assert!(Grid::from_layout(dim, "ab b\nc d\n").is_err()); // multi-char token
        assert!(Grid::from_layout(dim, "a 9\nc d\n").is_err()); // non-letter
        assert!(
            Grid::from_layout(matrix::Dim { rows: 9, cols: 9 }, "whatever").is_err() // > 64 tiles
        );
    }

    #[test]
    fn score_conservation() {
        let grid = grid_3x3();
        let board = Board::new(&grid);
        let board = board.capture(&mv(&[0, 1, 2]), Player::Blue);
        let board = board.capture(&mv(&[6, 7]), Player::Red);
        let score = board.score();
        let unowned = (0..9u8)
            .filter(|&tile| board.owner_of_tile(tile).is_none())
            .count() as i16;
        assert_eq!(score[0] + score[1] + unowned, 9);
    }

    #[test]
    fn corner_defense_needs_fewer_neighbors() {
        let grid = grid_2x2();
        let board = Board::new(&grid).capture(&mv(&[0, 1, 2]), Player::Blue);
        // tile 0's only neighbors (1 and 2) are blue
        assert!(board.is_defended(0, 0));
        assert!(!board.is_defended(0, 1));
        assert!(!board.is_defended(1, 0));
    }

    #[test]
    fn well_defended_implies_defended() {
        let grid = grid_3x3();
        let board = Board::new(&grid).capture(&mv(&[0, 1, 2, 3, 4, 5, 6, 7, 8]), Player::Red);
        let dim = grid.dim();
        for row in 0..dim.rows {
            for col in 0..dim.cols {
                assert!(board.is_defended(row, col));
                assert!(!board.is_well_defended(row, col) || board.is_defended(row, col));
            }
        }
        // full single-color board is well-defended everywhere
        assert_eq!(board.num_well_defended(), [0, 9]);
    }

    #[test]
    fn defended_tiles_resist_capture() {
        let grid = grid_2x2();
        let board = Board::new(&grid).capture(&mv(&[0, 1, 2]), Player::Blue);
        assert!(board.is_defended(0, 0));
        let board = board.capture(&mv(&[0, 3]), Player::Red);
        assert_eq!(board.owner(0, 0), Some(Player::Blue)); // defended, untouched
        assert_eq!(board.owner(1, 1), Some(Player::Red));
    }

    #[test]
    fn capture_defense_is_pre_move_atomic() {
        // red holds a defended at (0,0) via b and d; blue takes b first in
        // the same move, which must not expose a within that move
        let grid = grid_3x3();
        let board = Board::new(&grid).capture(&mv(&[0, 1, 3]), Player::Red);
        assert!(board.is_defended(0, 0));
        let board = board.capture(&mv(&[1, 0]), Player::Blue);
        assert_eq!(board.owner(0, 0), Some(Player::Red));
        assert_eq!(board.owner(0, 1), Some(Player::Blue));
    }

    #[test]
    fn empty_capture_is_identity() {
        let grid = grid_3x3();
        let before = Board::new(&grid).capture(&mv(&[0, 4, 8]), Player::Blue);
        let after = before.capture(&mv(&[]), Player::Red);
        assert_eq!(before.score(), after.score());
        for tile in 0..9u8 {
            assert_eq!(before.owner_of_tile(tile), after.owner_of_tile(tile));
        }
    }

    #[test]
    fn defense_stable_when_neighbors_unchanged() {
        let grid = grid_3x3();
        let g1 = Board::new(&grid).capture(&mv(&[0, 1, 3]), Player::Blue);
        assert!(g1.is_defended(0, 0));
        // capture far from tile 0's neighborhood
        let g2 = g1.capture(&mv(&[8]), Player::Red);
        assert!(g2.is_defended(0, 0));
    }

    #[test]
    fn free_letters_shrink_per_generation() {
        let grid = grid_2x2();
        let board = Board::new(&grid);
        assert_eq!(board.free_letter_tally()[0], 1);
        let board = board.capture(&mv(&[0]), Player::Blue);
        assert_eq!(board.free_letter_tally()[0], 0);
        assert_eq!(board.free_letter_tally()[3], 1);
        // the whole-board tally is static
        assert_eq!(board.grid().letter_tally()[0], 1);
    }

    #[test]
    fn full_board_detection() {
        let grid = grid_2x2();
        let board = Board::new(&grid);
        assert!(!board.is_full());
        let board = board.capture(&mv(&[0, 1, 2, 3]), Player::Blue);
        assert!(board.is_full());
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_owner_query_panics() {
        let grid = grid_2x2();
        let board = Board::new(&grid);
        board.owner(2, 0);
    }
}
