//! Recent-history dedup set
//!
//! A bounded FIFO of the last served quote texts, used to reject a candidate
//! that matches something the player has already seen this session.

use std::collections::VecDeque;

/// Default number of served texts remembered for dedup.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Bounded FIFO set of recently served quote texts.
///
/// Membership is checked on trimmed text. Once the set exceeds its capacity,
/// the oldest entry is evicted.
#[derive(Debug, Clone)]
pub struct RecentHistory {
    texts: VecDeque<String>,
    capacity: usize,
}

impl RecentHistory {
    /// Create a history with the default capacity of 10
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a history with an explicit capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            texts: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Check whether a candidate text (trimmed) was recently served
    pub fn contains(&self, text: &str) -> bool {
        let trimmed = text.trim();
        self.texts.iter().any(|t| t == trimmed)
    }

    /// Record a served text, evicting the oldest entry beyond capacity
    pub fn record(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.texts.push_back(trimmed.to_string());
        while self.texts.len() > self.capacity {
            self.texts.pop_front();
        }
    }

    /// Forget everything (session restart)
    pub fn clear(&mut self) {
        self.texts.clear();
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::new()
    }
}
