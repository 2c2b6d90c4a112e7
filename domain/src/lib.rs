//! Domain layer for botlines
//!
//! This crate contains the core business logic, entities, and value objects
//! for the AI-or-Human quote guessing game. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Quote supply
//!
//! Quotes arrive as raw model text (possibly wrapped in prose), are validated
//! into [`Quote`] values by the tolerant parser, and are deduplicated against
//! a bounded [`RecentHistory`] of served texts.
//!
//! ## Game session
//!
//! [`GameSession`] is the turn-based state machine: it owns the quote pool,
//! the consumption index, and the score/total counters, and moves through
//! `NotStarted → AwaitingGuess → Answered → (AwaitingGuess | Finished)`.

pub mod core;
pub mod game;
pub mod personalization;
pub mod prompt;
pub mod quote;
pub mod util;

// Re-export commonly used types
pub use core::error::DomainError;
pub use game::session::{AdvanceOutcome, GameSession, GuessOutcome, Phase};
pub use personalization::{AgeGroup, Personalization, Topic};
pub use prompt::QuotePromptTemplate;
pub use quote::{
    entities::{Origin, Quote, QuotePool},
    history::RecentHistory,
    parser::{extract_json_payload, parse_quote_batch, parse_quote_record, parse_quote_single},
};
