// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, player};

// owned tiles are colored, defended tiles get the colored background,
// well-defended tiles are additionally bold
fn tile_style(board: &board::Board, row: i8, col: i8) -> &'static str {
    match board.owner(row, col) {
        None => "",
        Some(player::Player::Blue) => {
            if board.is_well_defended(row, col) {
                "\x1b[1;97;44m"
            } else if board.is_defended(row, col) {
                "\x1b[97;44m"
            } else {
                "\x1b[94m"
            }
        }
        Some(player::Player::Red) => {
            if board.is_well_defended(row, col) {
                "\x1b[1;97;41m"
            } else if board.is_defended(row, col) {
                "\x1b[97;41m"
            } else {
                "\x1b[91m"
            }
        }
    }
}

pub fn print_board(board: &board::Board) {
    let dim = board.grid().dim();
    print!("  ");
    for c in 0..dim.cols {
        print!(" {}", ((c as u8) + 0x61) as char);
    }
    println!();
    print!("  +");
    for _ in 1..dim.cols {
        print!("--");
    }
    println!("-+");
    for r in 0..dim.rows {
        print!("{:2}|", r + 1);
        for c in 0..dim.cols {
            if c > 0 {
                print!(" ")
            }
            let letter = board.grid().letters()[dim.at_row_col(r, c)];
            let style = tile_style(board, r, c);
            if style.is_empty() {
                print!("{}", letter.to_ascii_uppercase() as char);
            } else {
                print!("{}{}\x1b[m", style, letter.to_ascii_uppercase() as char);
            }
        }
        println!("|{}", r + 1);
    }
    print!("  +");
    for _ in 1..dim.cols {
        print!("--");
    }
    println!("-+");
    print!("  ");
    for c in 0..dim.cols {
        print!(" {}", ((c as u8) + 0x61) as char);
    }
    println!();
}

pub fn print_score(board: &board::Board) {
    let score = board.score();
    let defended = board.num_defended();
    let well_defended = board.num_well_defended();
    println!(
        "blue {} ({} defended, {} well), red {} ({} defended, {} well)",
        score[0], defended[0], well_defended[0], score[1], defended[1], well_defended[1]
    );
}
