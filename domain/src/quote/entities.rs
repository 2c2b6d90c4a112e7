//! Quote value objects and the quote pool

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Text shown when every fetch attempt has been exhausted.
///
/// The game must always have something to display, so the supply layer falls
/// back to this fixed quote instead of failing the caller.
pub const FALLBACK_QUOTE_TEXT: &str =
    "The measure of intelligence is the ability to change... or at least to retry.";

/// Declared origin of a quote (Value Object)
///
/// The wire labels are exactly `"AI"` and `"Human"`; anything else is
/// rejected during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    #[serde(rename = "AI")]
    Ai,
    #[serde(rename = "Human")]
    Human,
}

impl Origin {
    /// Get the wire label for this origin
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Ai => "AI",
            Origin::Human => "Human",
        }
    }

    /// Parse the exact wire label. Returns `None` for anything else,
    /// including case variants — validation is strict here on purpose.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "AI" => Some(Origin::Ai),
            "Human" => Some(Origin::Human),
            _ => None,
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Origin {
    type Err = DomainError;

    /// Lenient parse for player input and CLI flags ("ai", "human", "h", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ai" | "a" | "bot" => Ok(Origin::Ai),
            "human" | "h" => Ok(Origin::Human),
            other => Err(DomainError::InvalidOrigin(other.to_string())),
        }
    }
}

/// A single quote candidate served to the player (Value Object)
///
/// Invariants: `text` is non-empty after trimming; `author` is present only
/// when the origin is [`Origin::Human`] and is never the literal "none".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    text: String,
    origin: Origin,
    author: Option<String>,
}

impl Quote {
    /// Create a new quote
    ///
    /// # Panics
    /// Panics if the text is empty or only whitespace
    pub fn new(text: impl Into<String>, origin: Origin) -> Self {
        Self::try_new(text, origin).expect("Quote text cannot be empty")
    }

    /// Try to create a new quote, returning None if the text is blank
    pub fn try_new(text: impl Into<String>, origin: Origin) -> Option<Self> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            text: trimmed.to_string(),
            origin,
            author: None,
        })
    }

    /// Attach an author attribution.
    ///
    /// Kept only for human quotes, and only when the value is meaningful —
    /// the generator emits the literal "none" for unattributed quotes.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        let author = author.into();
        let trimmed = author.trim();
        if self.origin == Origin::Human
            && !trimmed.is_empty()
            && !trimmed.eq_ignore_ascii_case("none")
        {
            self.author = Some(trimmed.to_string());
        }
        self
    }

    /// The deterministic fallback quote served when all fetch attempts fail.
    pub fn fallback() -> Self {
        Quote::new(FALLBACK_QUOTE_TEXT, Origin::Ai)
    }

    /// Get the quote text (already trimmed)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the declared origin
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Get the author attribution, if any
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.text)
    }
}

/// An ordered pool of quotes for one game run.
///
/// Created once at game start and never reordered; the session only advances
/// a consumption index over it. Single-fetch games append one quote at a time
/// via [`push`](Self::push) as the game progresses.
#[derive(Debug, Clone, Default)]
pub struct QuotePool {
    quotes: Vec<Quote>,
}

impl QuotePool {
    /// Create a pool from validated quotes
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    /// Create a pool holding a single quote (single-fetch mode)
    pub fn single(quote: Quote) -> Self {
        Self {
            quotes: vec![quote],
        }
    }

    /// Append a freshly fetched quote (single-fetch mode)
    pub fn push(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    /// Quote at the given consumption index
    pub fn get(&self, index: usize) -> Option<&Quote> {
        self.quotes.get(index)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Iterate the pool in serving order
    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.iter()
    }
}

impl From<Vec<Quote>> for QuotePool {
    fn from(quotes: Vec<Quote>) -> Self {
        QuotePool::new(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_creation_trims() {
        let q = Quote::new("  To be or not to be.  ", Origin::Human);
        assert_eq!(q.text(), "To be or not to be.");
        assert_eq!(q.origin(), Origin::Human);
        assert!(q.author().is_none());
    }

    #[test]
    #[should_panic]
    fn test_blank_quote_panics() {
        Quote::new("   ", Origin::Ai);
    }

    #[test]
    fn test_try_new_blank() {
        assert!(Quote::try_new("", Origin::Ai).is_none());
        assert!(Quote::try_new(" \n ", Origin::Human).is_none());
    }

    #[test]
    fn test_author_kept_for_human() {
        let q = Quote::new("Stay hungry.", Origin::Human).with_author("Steve Jobs");
        assert_eq!(q.author(), Some("Steve Jobs"));
    }

    #[test]
    fn test_author_dropped_for_ai() {
        let q = Quote::new("I compute, therefore I am.", Origin::Ai).with_author("GPT");
        assert!(q.author().is_none());
    }

    #[test]
    fn test_author_none_literal_dropped() {
        let q = Quote::new("Anonymous wisdom.", Origin::Human).with_author("None");
        assert!(q.author().is_none());
        let q = Quote::new("Anonymous wisdom.", Origin::Human).with_author("none");
        assert!(q.author().is_none());
    }

    #[test]
    fn test_origin_labels() {
        assert_eq!(Origin::from_label("AI"), Some(Origin::Ai));
        assert_eq!(Origin::from_label("Human"), Some(Origin::Human));
        assert_eq!(Origin::from_label("human"), None);
        assert_eq!(Origin::from_label("HUMAN"), None);
        assert_eq!(Origin::from_label("Machine"), None);
    }

    #[test]
    fn test_origin_player_input_parse() {
        assert_eq!("ai".parse::<Origin>().unwrap(), Origin::Ai);
        assert_eq!(" Human ".parse::<Origin>().unwrap(), Origin::Human);
        assert_eq!("h".parse::<Origin>().unwrap(), Origin::Human);
        assert!("maybe".parse::<Origin>().is_err());
    }

    #[test]
    fn test_fallback_quote_is_ai() {
        let q = Quote::fallback();
        assert_eq!(q.origin(), Origin::Ai);
        assert!(!q.text().is_empty());
    }

    #[test]
    fn test_pool_push_and_get() {
        let mut pool = QuotePool::single(Quote::new("one", Origin::Ai));
        assert_eq!(pool.len(), 1);
        pool.push(Quote::new("two", Origin::Human));
        assert_eq!(pool.get(1).unwrap().text(), "two");
        assert!(pool.get(2).is_none());
    }
}
