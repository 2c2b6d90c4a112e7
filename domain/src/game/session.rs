//! Game session state machine
//!
//! Owns the quote pool, the consumption index, the score/total counters, and
//! the turn phase. Processes exactly one command at a time; commands arriving
//! in the wrong phase are no-ops, not errors.
//!
//! ```text
//! NotStarted → AwaitingGuess → Answered → (AwaitingGuess | Finished)
//!     ↑                                         │
//!     └──────────────── restart ────────────────┘
//! ```

use crate::core::error::DomainError;
use crate::quote::entities::{Origin, Quote, QuotePool};
use crate::quote::history::RecentHistory;

/// Turn phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game running; a pool has not been accepted yet
    NotStarted,
    /// A quote is on display, waiting for the player's guess
    AwaitingGuess,
    /// The guess was scored and the origin revealed
    Answered,
    /// The run is over; only restart is meaningful
    Finished,
}

/// Reveal information produced by scoring a guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    /// Whether the guess matched the quote's declared origin
    pub correct: bool,
    /// The true origin, revealed regardless of the match
    pub origin: Origin,
    /// Author attribution, when human and known
    pub author: Option<String>,
    pub score: u32,
    pub total: u32,
}

/// Result of an [`advance`](GameSession::advance) call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The next quote is on display
    Next,
    /// Pool exhausted below the round cap — the caller decides whether to
    /// fetch another quote ([`supply_quote`](GameSession::supply_quote)) or
    /// end the run ([`finish`](GameSession::finish))
    NeedsQuote,
    /// Round cap reached; the session is now [`Phase::Finished`]
    Finished,
}

/// The turn-based game session (Entity)
///
/// Invariants: `score <= total` always; `total` never decreases except on
/// restart; exactly one quote is current whenever the phase is
/// `AwaitingGuess` or `Answered`.
#[derive(Debug, Clone)]
pub struct GameSession {
    pool: QuotePool,
    current_index: usize,
    score: u32,
    total: u32,
    phase: Phase,
    round_cap: Option<u32>,
    recent: RecentHistory,
}

impl GameSession {
    /// Create an idle session. `round_cap` bounds the number of rounds per
    /// run; `None` plays until the pool is exhausted.
    pub fn new(round_cap: Option<u32>) -> Self {
        Self {
            pool: QuotePool::default(),
            current_index: 0,
            score: 0,
            total: 0,
            phase: Phase::NotStarted,
            round_cap,
            recent: RecentHistory::new(),
        }
    }

    /// Accept a quote pool and start a run.
    ///
    /// Valid only from [`Phase::NotStarted`]. An empty pool fails the start
    /// and leaves the session idle so the player can try again.
    pub fn begin(&mut self, pool: QuotePool) -> Result<(), DomainError> {
        if self.phase != Phase::NotStarted {
            return Err(DomainError::AlreadyStarted);
        }
        if pool.is_empty() {
            return Err(DomainError::EmptyPool);
        }
        self.pool = pool;
        self.current_index = 0;
        self.score = 0;
        self.total = 0;
        if let Some(first) = self.pool.get(0) {
            self.recent.record(first.text());
        }
        self.phase = Phase::AwaitingGuess;
        Ok(())
    }

    /// Score the player's guess against the current quote.
    ///
    /// Valid only in [`Phase::AwaitingGuess`]; out-of-phase calls return
    /// `None` and change nothing, so a double submit never double-counts.
    pub fn submit_guess(&mut self, choice: Origin) -> Option<GuessOutcome> {
        if self.phase != Phase::AwaitingGuess {
            return None;
        }
        let quote = self.pool.get(self.current_index)?;
        let correct = choice == quote.origin();
        let origin = quote.origin();
        let author = quote.author().map(str::to_string);

        self.total += 1;
        if correct {
            self.score += 1;
        }
        self.phase = Phase::Answered;

        Some(GuessOutcome {
            correct,
            origin,
            author,
            score: self.score,
            total: self.total,
        })
    }

    /// Move on from a revealed quote.
    ///
    /// Valid only in [`Phase::Answered`]; out-of-phase calls return `None`.
    pub fn advance(&mut self) -> Option<AdvanceOutcome> {
        if self.phase != Phase::Answered {
            return None;
        }
        if let Some(cap) = self.round_cap
            && self.total >= cap
        {
            self.phase = Phase::Finished;
            return Some(AdvanceOutcome::Finished);
        }
        if let Some(next) = self.pool.get(self.current_index + 1) {
            let text = next.text().to_string();
            self.current_index += 1;
            self.recent.record(&text);
            self.phase = Phase::AwaitingGuess;
            return Some(AdvanceOutcome::Next);
        }
        Some(AdvanceOutcome::NeedsQuote)
    }

    /// Append a freshly fetched quote and complete a pending
    /// [`AdvanceOutcome::NeedsQuote`].
    ///
    /// Returns `false` (and drops the quote) outside [`Phase::Answered`].
    pub fn supply_quote(&mut self, quote: Quote) -> bool {
        if self.phase != Phase::Answered {
            return false;
        }
        self.recent.record(quote.text());
        self.pool.push(quote);
        self.current_index += 1;
        self.phase = Phase::AwaitingGuess;
        true
    }

    /// End the run after the final reveal (pool exhausted in batch mode).
    ///
    /// Valid only in [`Phase::Answered`]; a no-op otherwise.
    pub fn finish(&mut self) {
        if self.phase == Phase::Answered {
            self.phase = Phase::Finished;
        }
    }

    /// Hard reset: clears counters, pool, and the recent-history set.
    /// Valid from any phase.
    pub fn restart(&mut self) {
        self.pool = QuotePool::default();
        self.current_index = 0;
        self.score = 0;
        self.total = 0;
        self.recent.clear();
        self.phase = Phase::NotStarted;
    }

    /// The quote on display, present in `AwaitingGuess` and `Answered`
    pub fn current_quote(&self) -> Option<&Quote> {
        match self.phase {
            Phase::AwaitingGuess | Phase::Answered => self.pool.get(self.current_index),
            _ => None,
        }
    }

    /// 1-based position of the current quote, for display
    pub fn round_number(&self) -> u32 {
        self.current_index as u32 + 1
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn round_cap(&self) -> Option<u32> {
        self.round_cap
    }

    /// Recently served quote texts, for supply-side dedup
    pub fn recent(&self) -> &RecentHistory {
        &self.recent
    }
}
