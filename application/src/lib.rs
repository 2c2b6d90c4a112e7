//! Application layer for botlines
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.
//!
//! The two use cases mirror the two halves of the game:
//!
//! - [`QuoteSupplier`] — obtains quotes from a [`QuoteSource`] with bounded
//!   retry, validation thresholds, and a deterministic fallback.
//! - [`GameEngine`] — dispatches player commands (`start`, `submit_guess`,
//!   `advance`, `restart`) over a [`GameSession`](botlines_domain::GameSession)
//!   and produces presentation-ready views.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{FetchMode, GameParams, SupplyParams};
pub use ports::quote_source::{QuoteSource, SourceError};
pub use use_cases::play_game::{
    AdvanceView, GameEngine, GameSummary, QuoteView, RevealView, StartOutcome,
};
pub use use_cases::supply_quotes::QuoteSupplier;
