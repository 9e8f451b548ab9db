// Copyright (C) 2020-2026 Andy Kurnia.

use lepress::{board, error, game_state, lexicon, scorer};
use rand::prelude::*;

thread_local! {
    static RNG: std::cell::RefCell<Box<dyn RngCore>> =
        std::cell::RefCell::new(Box::new(rand_chacha::ChaCha20Rng::from_os_rng()));
}

// omits 01IOl
static BASE57: &[u8; 57] = b"\
23456789\
ABCDEFGHJKLMNPQRSTUVWXYZ\
abcdefghijkmnopqrstuvwxyz\
";

const GAME_ID_LEN: usize = 8;

pub fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() <= 1 {
        return Err("usage: batch dict-file [num-games]".into());
    }
    let words = std::sync::Arc::new(lexicon::parse_words(&std::fs::read_to_string(&args[1])?));
    let num_games = if args.len() > 2 {
        args[2].parse::<usize>()?
    } else {
        1000
    };
    let num_threads = num_cpus::get();
    let num_processed_games = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let mut threads = vec![];
    let (tx, rx) = std::sync::mpsc::channel();
    for _ in 0..num_threads {
        let tx = tx.clone();
        let words = std::sync::Arc::clone(&words);
        let num_processed_games = std::sync::Arc::clone(&num_processed_games);
        threads.push(std::thread::spawn(move || {
            RNG.with(|rng| {
                let mut rng = &mut *rng.borrow_mut();
                let mut game_id = String::with_capacity(GAME_ID_LEN);
                loop {
                    if num_processed_games.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
                        >= num_games
                    {
                        num_processed_games.fetch_sub(1, std::sync::atomic::Ordering::Relaxed);
                        break;
                    }

                    game_id.clear();
                    for _ in 0..GAME_ID_LEN {
                        game_id.push(*BASE57.choose(&mut rng).unwrap() as char);
                    }
                    let grid = std::sync::Arc::new(
                        board::Grid::random(board::STANDARD_DIM, &mut **rng).unwrap(),
                    );
                    let mut lexicon = lexicon::Lexicon::build(&words, &grid);
                    let mut game_state = game_state::GameState::new(&grid);
                    if rng.random_range(0..2) == 1 {
                        game_state.next_turn();
                    }
                    let first_player = game_state.turn;
                    let mut num_plies = 0u32;
                    let mut num_passes = 0u32;
                    while !game_state.is_over() {
                        let picked = {
                            let mut scorer =
                                scorer::Scorer::new(&game_state.board, game_state.turn);
                            scorer.check_all(&lexicon);
                            scorer.best_move(&lexicon)
                        };
                        match picked {
                            Some(best) => {
                                game_state.play(&mut lexicon, &best.word, &best.mv);
                            }
                            None => {
                                game_state.pass();
                                num_passes += 1;
                            }
                        }
                        num_plies += 1;
                        game_state.next_turn();
                    }
                    let score = game_state.board.score();
                    let winner = match score[0].cmp(&score[1]) {
                        std::cmp::Ordering::Greater => "blue",
                        std::cmp::Ordering::Less => "red",
                        std::cmp::Ordering::Equal => "draw",
                    };
                    tx.send((
                        game_id.clone(),
                        String::from_utf8(grid.letters().to_vec()).unwrap(),
                        first_player.label(),
                        winner,
                        score[0],
                        score[1],
                        num_plies,
                        num_passes,
                    ))
                    .unwrap();
                }
            });
        }));
    }
    drop(tx);

    let mut run_identifier = String::with_capacity(GAME_ID_LEN);
    RNG.with(|rng| {
        let mut rng = &mut *rng.borrow_mut();
        for _ in 0..GAME_ID_LEN {
            run_identifier.push(*BASE57.choose(&mut rng).unwrap() as char);
        }
    });
    println!("logging {} games to games-{}", num_games, run_identifier);
    let mut csv_game = csv::Writer::from_path(format!("games-{}", run_identifier))?;
    csv_game.serialize((
        "game_id",
        "board",
        "first_player",
        "winner",
        "blue_score",
        "red_score",
        "plies",
        "passes",
    ))?;

    let t0 = std::time::Instant::now();
    let mut num_logged_games = 0usize;
    for row in rx.iter() {
        csv_game.serialize(row)?;
        num_logged_games += 1;
        if num_logged_games % 100 == 0 {
            csv_game.flush()?;
            println!("{} games in {:?}", num_logged_games, t0.elapsed());
        }
    }
    csv_game.flush()?;
    println!("{} games in {:?}", num_logged_games, t0.elapsed());

    for thread in threads {
        if let Err(e) = thread.join() {
            return Err(error::new(format!("thread join failure: {:?}", e)).into());
        }
    }
    Ok(())
}
