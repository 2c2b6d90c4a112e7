//! Use cases

pub mod play_game;
pub mod supply_quotes;
