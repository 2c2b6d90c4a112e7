//! Quote entities, tolerant parsing, and dedup history

pub mod entities;
pub mod history;
pub mod parser;
