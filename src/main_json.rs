// Copyright (C) 2020-2026 Andy Kurnia.

use lepress::{board, error, lexicon, matrix, player, scorer};

// board: rows of space-separated letters. owners: optional rows of
// '.'/'b'/'r' in the same shape. dict: path to a word list. player:
// "blue" or "red". count: maximum number of ranked candidates returned.
#[derive(serde::Deserialize)]
struct Question {
    size: Option<i8>,
    board: Vec<String>,
    owners: Option<Vec<String>>,
    dict: String,
    player: String,
    count: usize,
}

fn tiles_to_json(mv: &lepress::movegen::Move, dim: matrix::Dim) -> serde_json::Value {
    let cols = dim.cols as u8;
    serde_json::Value::Array(
        mv.tiles
            .iter()
            .map(|&tile| serde_json::json!([tile % cols, tile / cols]))
            .collect(),
    )
}

pub fn main() -> error::Returns<()> {
    let data = std::io::read_to_string(std::io::stdin())?;
    let question = serde_json::from_str::<Question>(&data)?;

    let size = question.size.unwrap_or(board::STANDARD_DIM.rows);
    let dim = matrix::Dim {
        rows: size,
        cols: size,
    };
    let grid = std::sync::Arc::new(board::Grid::from_layout(dim, &question.board.join("\n"))?);
    let board = match &question.owners {
        Some(rows) => board::Board::parse_owners(&grid, &rows.join("\n"))?,
        None => board::Board::new(&grid),
    };
    let player = match player::Player::from_label(&question.player) {
        Some(player) => player,
        None => return Err(error::new(format!("invalid player {:?}", question.player)).into()),
    };
    let words = lexicon::parse_words(&std::fs::read_to_string(&question.dict)?);
    let lexicon = lexicon::Lexicon::build(&words, &grid);

    let mut scorer = scorer::Scorer::new(&board, player);
    scorer.check_all(&lexicon);
    let candidates = scorer.top_moves(question.count);
    let best = scorer.best_move(&lexicon);

    let mut ranked = Vec::<serde_json::Value>::with_capacity(candidates.len());
    for candidate in candidates.iter() {
        ranked.push(serde_json::json!({
            "word": std::str::from_utf8(&candidate.word)?,
            "tiles": tiles_to_json(&candidate.mv, dim),
            "weighted": candidate.weighted,
        }));
    }
    let play = match &best {
        Some(best) => serde_json::json!({
            "word": std::str::from_utf8(&best.word)?,
            "tiles": tiles_to_json(&best.mv, dim),
            "weighted": best.weighted,
        }),
        None => serde_json::Value::Null, // the pass outcome
    };
    let ret = serde_json::json!({
        "play": play,
        "winning": scorer.found_winning_move,
        "moves_examined": scorer.moves_examined,
        "lookahead_examined": scorer.lookahead_examined,
        "candidates": ranked,
    });
    println!("{}", serde_json::to_string_pretty(&ret)?);
    Ok(())
}
