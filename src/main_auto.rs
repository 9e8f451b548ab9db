// Copyright (C) 2020-2026 Andy Kurnia.

use lepress::{board, display, error, game_state, lexicon, scorer};
use rand::prelude::*;

pub fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() <= 1 {
        return Err("usage: auto dict-file [board-file]".into());
    }
    let words = lexicon::parse_words(&std::fs::read_to_string(&args[1])?);
    let grid = if args.len() > 2 {
        std::sync::Arc::new(board::Grid::from_layout(
            board::STANDARD_DIM,
            &std::fs::read_to_string(&args[2])?,
        )?)
    } else {
        let mut rng = rand_chacha::ChaCha20Rng::from_os_rng();
        std::sync::Arc::new(board::Grid::random(board::STANDARD_DIM, &mut rng)?)
    };
    let mut lexicon = lexicon::Lexicon::build(&words, &grid);
    println!(
        "{} of {} dictionary words are playable on this board",
        lexicon.len(),
        words.len()
    );

    let mut game_state = game_state::GameState::new(&grid);
    display::print_board(&game_state.board);

    while !game_state.is_over() {
        let (picked, found_winning_move, moves_examined, lookahead_examined) = {
            let mut scorer = scorer::Scorer::new(&game_state.board, game_state.turn);
            scorer.check_all(&lexicon);
            let picked = scorer.best_move(&lexicon);
            (
                picked,
                scorer.found_winning_move,
                scorer.moves_examined,
                scorer.lookahead_examined,
            )
        };
        match picked {
            Some(best) => {
                println!(
                    "{} plays \"{}\" at {} (weighted {}, examined {} moves, {} lookahead moves)",
                    game_state.turn,
                    std::str::from_utf8(&best.word)?,
                    best.mv.fmt(&grid),
                    best.weighted,
                    moves_examined,
                    lookahead_examined,
                );
                if found_winning_move {
                    println!("{} found a winning move", game_state.turn);
                }
                game_state.play(&mut lexicon, &best.word, &best.mv);
                display::print_board(&game_state.board);
                display::print_score(&game_state.board);
            }
            None => {
                println!(
                    "{} has no safe move and passes (examined {} moves, {} lookahead moves)",
                    game_state.turn, moves_examined, lookahead_examined,
                );
                game_state.pass();
            }
        }
        game_state.next_turn();
    }

    let score = game_state.board.score();
    match score[0].cmp(&score[1]) {
        std::cmp::Ordering::Greater => {
            println!(
                "final score: blue {}, red {} (blue wins by {})",
                score[0],
                score[1],
                score[0] - score[1],
            );
        }
        std::cmp::Ordering::Less => {
            println!(
                "final score: blue {}, red {} (red wins by {})",
                score[0],
                score[1],
                score[1] - score[0],
            );
        }
        std::cmp::Ordering::Equal => {
            println!(
                "final score: blue {}, red {} (it's a draw)",
                score[0], score[1],
            );
        }
    };
    Ok(())
}
