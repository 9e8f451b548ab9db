// Copyright (C) 2020-2026 Andy Kurnia.

use lepress::{board, display, error, game_state, lexicon, matrix, rlhelper, scorer};
use rand::prelude::*;

struct Session {
    grid: std::sync::Arc<board::Grid>,
    lexicon: lexicon::Lexicon,
    game_state: game_state::GameState,
}

struct ShellEnv {
    grid: Option<std::sync::Arc<board::Grid>>,
    words: Option<Vec<Box<[u8]>>>,
    session: Option<Session>,
}

impl ShellEnv {
    // a session needs both a board and a dictionary
    fn start_session(&mut self) {
        if let (Some(grid), Some(words)) = (&self.grid, &self.words) {
            let lexicon = lexicon::Lexicon::build(words, grid);
            println!("{} words playable on this board", lexicon.len());
            let game_state = game_state::GameState::new(grid);
            display::print_board(&game_state.board);
            self.session = Some(Session {
                grid: std::sync::Arc::clone(grid),
                lexicon,
                game_state,
            });
        }
    }
}

fn print_result(game_state: &game_state::GameState) {
    let score = game_state.board.score();
    match score[0].cmp(&score[1]) {
        std::cmp::Ordering::Greater => {
            println!("game over, blue wins {} to {}", score[0], score[1]);
        }
        std::cmp::Ordering::Less => {
            println!("game over, red wins {} to {}", score[1], score[0]);
        }
        std::cmp::Ordering::Equal => {
            println!("game over, drawn at {} each", score[0]);
        }
    }
}

fn play_picked(session: &mut Session, picked: Option<scorer::RankedMove>) {
    match picked {
        Some(best) => {
            println!(
                "{} plays \"{}\" at {} (weighted {})",
                session.game_state.turn,
                String::from_utf8_lossy(&best.word),
                best.mv.fmt(&session.grid),
                best.weighted,
            );
            session
                .game_state
                .play(&mut session.lexicon, &best.word, &best.mv);
        }
        None => {
            println!("{} has no safe move and passes", session.game_state.turn);
            session.game_state.pass();
        }
    }
    session.game_state.next_turn();
}

fn pick_best(session: &Session) -> Option<scorer::RankedMove> {
    let mut scorer = scorer::Scorer::new(&session.game_state.board, session.game_state.turn);
    scorer.check_all(&session.lexicon);
    scorer.best_move(&session.lexicon)
}

fn pick_word(session: &Session, word: &[u8]) -> Option<scorer::RankedMove> {
    let moves = session.lexicon.moves_for(word)?;
    let mut scorer = scorer::Scorer::new(&session.game_state.board, session.game_state.turn);
    for mv in moves {
        scorer.check_move(word, mv);
        if scorer.found_winning_move {
            break;
        }
    }
    scorer.best_move(&session.lexicon)
}

pub fn main() -> error::Returns<()> {
    let mut env = ShellEnv {
        grid: None,
        words: None,
        session: None,
    };
    let mut rl = rlhelper::new_rl_editor()?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{}:{}> {}", filename, line_num, line);
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if !strings.is_empty() {
                        match strings[0].as_str() {
                            "help" => {
                                println!("board FILE   load a board layout");
                                println!("rand [N]     generate a random NxN board (default 5)");
                                println!("dict FILE    load a dictionary");
                                println!("new          restart the game on the same inputs");
                                println!("show         print the board");
                                println!("score        print the score");
                                println!("best [N]     show the top candidates and the pick");
                                println!("play [WORD]  play the pick, or a specific word");
                                println!("pass         pass the turn");
                                println!("auto         play both sides to the end");
                                println!("source FILE  run commands from a file");
                                println!("exit");
                            }
                            "exit" => {
                                break;
                            }
                            "source" => {
                                if strings.len() > 1 {
                                    match std::fs::read_to_string(&strings[1]) {
                                        Ok(whole_file) => {
                                            let v = cmd_stack.len();
                                            for (line_num, line) in whole_file.lines().enumerate() {
                                                cmd_stack.push((
                                                    line.to_string(),
                                                    Some((strings[1].clone(), line_num + 1)),
                                                ));
                                            }
                                            cmd_stack[v..].reverse();
                                        }
                                        Err(err) => {
                                            println!("cannot open file: {:?}", err);
                                        }
                                    }
                                } else {
                                    println!("need another arg");
                                }
                            }
                            "board" => {
                                if strings.len() > 1 {
                                    match std::fs::read_to_string(&strings[1]) {
                                        Ok(text) => match board::Grid::from_layout(
                                            board::STANDARD_DIM,
                                            &text,
                                        ) {
                                            Ok(grid) => {
                                                env.grid = Some(std::sync::Arc::new(grid));
                                                env.session = None;
                                                env.start_session();
                                            }
                                            Err(err) => {
                                                println!("bad layout: {}", err);
                                            }
                                        },
                                        Err(err) => {
                                            println!("cannot open file: {:?}", err);
                                        }
                                    }
                                } else {
                                    println!("need another arg");
                                }
                            }
                            "rand" => {
                                let size = if strings.len() > 1 {
                                    strings[1].parse::<i8>().unwrap_or(0)
                                } else {
                                    board::STANDARD_DIM.rows
                                };
                                if size < 1 {
                                    println!("bad size");
                                } else {
                                    let mut rng = rand_chacha::ChaCha20Rng::from_os_rng();
                                    match board::Grid::random(
                                        matrix::Dim {
                                            rows: size,
                                            cols: size,
                                        },
                                        &mut rng,
                                    ) {
                                        Ok(grid) => {
                                            env.grid = Some(std::sync::Arc::new(grid));
                                            env.session = None;
                                            env.start_session();
                                        }
                                        Err(err) => {
                                            println!("{}", err);
                                        }
                                    }
                                }
                            }
                            "dict" => {
                                if strings.len() > 1 {
                                    match std::fs::read_to_string(&strings[1]) {
                                        Ok(text) => {
                                            let words = lexicon::parse_words(&text);
                                            println!("{} words loaded", words.len());
                                            env.words = Some(words);
                                            env.session = None;
                                            env.start_session();
                                        }
                                        Err(err) => {
                                            println!("cannot open file: {:?}", err);
                                        }
                                    }
                                } else {
                                    println!("need another arg");
                                }
                            }
                            "new" => {
                                env.session = None;
                                env.start_session();
                                if env.session.is_none() {
                                    println!("load a board and a dict first");
                                }
                            }
                            "show" => match &env.session {
                                Some(session) => {
                                    display::print_board(&session.game_state.board);
                                    display::print_score(&session.game_state.board);
                                    println!("turn: {}", session.game_state.turn);
                                }
                                None => {
                                    println!("load a board and a dict first");
                                }
                            },
                            "score" => match &env.session {
                                Some(session) => {
                                    display::print_score(&session.game_state.board);
                                }
                                None => {
                                    println!("load a board and a dict first");
                                }
                            },
                            "best" => match &env.session {
                                Some(session) => {
                                    let num_shown = if strings.len() > 1 {
                                        strings[1].parse::<usize>().unwrap_or(10)
                                    } else {
                                        10
                                    };
                                    let mut scorer = scorer::Scorer::new(
                                        &session.game_state.board,
                                        session.game_state.turn,
                                    );
                                    scorer.check_all(&session.lexicon);
                                    for candidate in scorer.top_moves(num_shown).iter() {
                                        println!(
                                            "{:4} {} at {}",
                                            candidate.weighted,
                                            String::from_utf8_lossy(&candidate.word),
                                            candidate.mv.fmt(&session.grid),
                                        );
                                    }
                                    match scorer.best_move(&session.lexicon) {
                                        Some(best) => {
                                            println!(
                                                "{} would play \"{}\" at {}",
                                                session.game_state.turn,
                                                String::from_utf8_lossy(&best.word),
                                                best.mv.fmt(&session.grid),
                                            );
                                        }
                                        None => {
                                            println!(
                                                "{} has no safe move",
                                                session.game_state.turn
                                            );
                                        }
                                    }
                                }
                                None => {
                                    println!("load a board and a dict first");
                                }
                            },
                            "play" => match &mut env.session {
                                Some(session) => {
                                    if session.game_state.is_over() {
                                        println!("game is over, try new");
                                    } else if strings.len() > 1 {
                                        let word = strings[1].to_ascii_lowercase().into_bytes();
                                        if !session.lexicon.contains(&word) {
                                            println!("not a playable word on this board");
                                        } else {
                                            match pick_word(session, &word) {
                                                Some(picked) => {
                                                    play_picked(session, Some(picked));
                                                    display::print_board(
                                                        &session.game_state.board,
                                                    );
                                                    display::print_score(
                                                        &session.game_state.board,
                                                    );
                                                }
                                                None => {
                                                    println!(
                                                        "every placement of that word loses"
                                                    );
                                                }
                                            }
                                        }
                                    } else {
                                        let picked = pick_best(session);
                                        play_picked(session, picked);
                                        display::print_board(&session.game_state.board);
                                        display::print_score(&session.game_state.board);
                                    }
                                    if session.game_state.is_over() {
                                        print_result(&session.game_state);
                                    }
                                }
                                None => {
                                    println!("load a board and a dict first");
                                }
                            },
                            "pass" => match &mut env.session {
                                Some(session) => {
                                    if session.game_state.is_over() {
                                        println!("game is over, try new");
                                    } else {
                                        println!("{} passes", session.game_state.turn);
                                        session.game_state.pass();
                                        session.game_state.next_turn();
                                        if session.game_state.is_over() {
                                            print_result(&session.game_state);
                                        }
                                    }
                                }
                                None => {
                                    println!("load a board and a dict first");
                                }
                            },
                            "auto" => match &mut env.session {
                                Some(session) => {
                                    while !session.game_state.is_over() {
                                        let picked = pick_best(session);
                                        play_picked(session, picked);
                                    }
                                    display::print_board(&session.game_state.board);
                                    print_result(&session.game_state);
                                }
                                None => {
                                    println!("load a board and a dict first");
                                }
                            },
                            _ => {
                                println!("invalid input, help for help");
                            }
                        }
                    }
                }
                Err(err) => {
                    println!("Bad quoting: {:?}", err);
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
    }

    Ok(())
}
