// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod board;
pub mod display;
pub mod fash;
pub mod game_state;
pub mod lexicon;
pub mod matrix;
pub mod movegen;
pub mod player;
pub mod rlhelper;
pub mod scorer;
