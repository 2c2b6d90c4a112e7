//! Play Game use case.
//!
//! Dispatches the four player commands — `start`, `submit_guess`, `advance`,
//! `restart` — over a [`GameSession`], fetching quotes through the
//! [`QuoteSupplier`] as needed. Each handler is an explicit transition over
//! owned session state, decoupled from any rendering cycle; the presentation
//! layer renders the view structs returned here.

use crate::config::{FetchMode, GameParams};
use crate::ports::quote_source::QuoteSource;
use crate::use_cases::supply_quotes::QuoteSupplier;
use botlines_domain::{
    AdvanceOutcome, GameSession, Origin, Personalization, Phase, QuotePool,
};
use std::sync::Arc;
use tracing::{debug, info};

/// A quote ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteView {
    /// 1-based round number
    pub round: u32,
    pub text: String,
    pub score: u32,
    pub total: u32,
}

/// Reveal shown after a guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealView {
    pub correct: bool,
    pub origin: Origin,
    /// Present only for human quotes with a known author, and only when
    /// author tracking is enabled
    pub author: Option<String>,
    pub score: u32,
    pub total: u32,
}

/// Terminal summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub total: u32,
}

impl GameSummary {
    /// Short verdict line keyed to the score ratio
    pub fn verdict(&self) -> &'static str {
        if self.total == 0 {
            return "No rounds played.";
        }
        let ratio = self.score as f64 / self.total as f64;
        if ratio >= 0.9 {
            "Uncanny. Are you sure you're not an AI yourself?"
        } else if ratio >= 0.7 {
            "Sharp eye! The machines can't fool you often."
        } else if ratio >= 0.5 {
            "Not bad — about as good as a coin flip, though."
        } else {
            "The machines got you this time. Play again?"
        }
    }
}

/// Result of a `start` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The run began; the first quote is on display
    Started(QuoteView),
    /// Quote acquisition ultimately failed; the session stays idle and the
    /// player can try again
    Unavailable(String),
    /// A run was already in progress; nothing changed
    Ignored,
}

/// Result of an `advance` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceView {
    Next(QuoteView),
    Finished(GameSummary),
}

/// The game engine: one per player session.
///
/// Owns the [`GameSession`] and processes one command at a time to
/// completion. Out-of-phase commands are no-ops, mirroring the state
/// machine's behavior.
pub struct GameEngine {
    supplier: QuoteSupplier,
    session: GameSession,
    params: GameParams,
    personalization: Personalization,
}

impl GameEngine {
    pub fn new(source: Arc<dyn QuoteSource>, params: GameParams) -> Self {
        let params = params.normalized();
        Self {
            supplier: QuoteSupplier::new(source, params.supply.clone()),
            session: GameSession::new(params.round_cap),
            params,
            personalization: Personalization::default(),
        }
    }

    /// Start a run with the given personalization.
    ///
    /// Batch mode obtains the whole pool up front; an empty pool surfaces as
    /// [`StartOutcome::Unavailable`]. Single mode obtains the first quote
    /// (which always succeeds, via the fallback).
    pub async fn start(&mut self, personalization: Personalization) -> StartOutcome {
        if self.session.phase() != Phase::NotStarted {
            debug!("start ignored: run already in progress");
            return StartOutcome::Ignored;
        }
        self.personalization = personalization;

        let pool = match self.params.fetch {
            FetchMode::Batch => self.supplier.obtain_pool(&self.personalization).await,
            FetchMode::Single => {
                let quote = self
                    .supplier
                    .obtain_one(&self.personalization, self.session.recent())
                    .await;
                QuotePool::single(quote)
            }
        };

        match self.session.begin(pool) {
            Ok(()) => {
                info!(
                    mode = ?self.params.fetch,
                    topic = %self.personalization.topic,
                    "Game started"
                );
                StartOutcome::Started(self.quote_view())
            }
            Err(e) => StartOutcome::Unavailable(format!("{e} right now — try again.")),
        }
    }

    /// Score a guess and reveal the answer. `None` when no quote is awaiting
    /// a guess (idempotent — repeat submits never double-count).
    pub fn submit_guess(&mut self, choice: Origin) -> Option<RevealView> {
        let outcome = self.session.submit_guess(choice)?;
        Some(RevealView {
            correct: outcome.correct,
            origin: outcome.origin,
            author: if self.params.track_authors {
                outcome.author
            } else {
                None
            },
            score: outcome.score,
            total: outcome.total,
        })
    }

    /// Move to the next round or finish the run. `None` outside the
    /// answered phase.
    pub async fn advance(&mut self) -> Option<AdvanceView> {
        match self.session.advance()? {
            AdvanceOutcome::Next => Some(AdvanceView::Next(self.quote_view())),
            AdvanceOutcome::Finished => Some(AdvanceView::Finished(self.summary())),
            AdvanceOutcome::NeedsQuote => match self.params.fetch {
                FetchMode::Single => {
                    let quote = self
                        .supplier
                        .obtain_one(&self.personalization, self.session.recent())
                        .await;
                    self.session.supply_quote(quote);
                    Some(AdvanceView::Next(self.quote_view()))
                }
                FetchMode::Batch => {
                    self.session.finish();
                    Some(AdvanceView::Finished(self.summary()))
                }
            },
        }
    }

    /// Hard reset back to the idle state
    pub fn restart(&mut self) {
        info!("Game restarted");
        self.session.restart();
    }

    /// The quote currently on display, if any
    pub fn current_view(&self) -> Option<QuoteView> {
        self.session.current_quote()?;
        Some(self.quote_view())
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.session.score(),
            total: self.session.total(),
        }
    }

    fn quote_view(&self) -> QuoteView {
        let text = self
            .session
            .current_quote()
            .map(|q| q.text().to_string())
            .unwrap_or_default();
        QuoteView {
            round: self.session.round_number(),
            text,
            score: self.session.score(),
            total: self.session.total(),
        }
    }
}
