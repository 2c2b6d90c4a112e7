//! Personalization vocabulary
//!
//! Purely descriptive context for quote generation: an age bucket and a topic.
//! Both flavor the generation prompt (or filter the curated table) and have no
//! effect on validation.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Age bucket the quotes should be pitched at (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeGroup {
    Kids,
    Teens,
    YoungAdults,
    Adults,
    Seniors,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Kids => "kids",
            AgeGroup::Teens => "teens",
            AgeGroup::YoungAdults => "young-adults",
            AgeGroup::Adults => "adults",
            AgeGroup::Seniors => "seniors",
        }
    }

    /// Phrase used inside the generation prompt
    pub fn prompt_phrase(&self) -> &'static str {
        match self {
            AgeGroup::Kids => "children under 12",
            AgeGroup::Teens => "teenagers",
            AgeGroup::YoungAdults => "young adults in their twenties",
            AgeGroup::Adults => "adults",
            AgeGroup::Seniors => "seniors",
        }
    }

    /// All buckets, for CLI listings
    pub fn all() -> [AgeGroup; 5] {
        [
            AgeGroup::Kids,
            AgeGroup::Teens,
            AgeGroup::YoungAdults,
            AgeGroup::Adults,
            AgeGroup::Seniors,
        ]
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kids" => Ok(AgeGroup::Kids),
            "teens" => Ok(AgeGroup::Teens),
            "young-adults" | "young_adults" => Ok(AgeGroup::YoungAdults),
            "adults" => Ok(AgeGroup::Adults),
            "seniors" => Ok(AgeGroup::Seniors),
            other => Err(DomainError::InvalidQuote(format!(
                "unknown age group: {other}"
            ))),
        }
    }
}

/// Topic the quotes should lean toward (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    Technology,
    Philosophy,
    Humor,
    Motivation,
    Science,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Technology => "technology",
            Topic::Philosophy => "philosophy",
            Topic::Humor => "humor",
            Topic::Motivation => "motivation",
            Topic::Science => "science",
        }
    }

    /// All topics, for CLI listings
    pub fn all() -> [Topic; 5] {
        [
            Topic::Technology,
            Topic::Philosophy,
            Topic::Humor,
            Topic::Motivation,
            Topic::Science,
        ]
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Topic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "technology" | "tech" => Ok(Topic::Technology),
            "philosophy" => Ok(Topic::Philosophy),
            "humor" => Ok(Topic::Humor),
            "motivation" => Ok(Topic::Motivation),
            "science" => Ok(Topic::Science),
            other => Err(DomainError::InvalidQuote(format!("unknown topic: {other}"))),
        }
    }
}

/// Player-selected generation context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personalization {
    pub age_group: AgeGroup,
    pub topic: Topic,
}

impl Personalization {
    pub fn new(age_group: AgeGroup, topic: Topic) -> Self {
        Self { age_group, topic }
    }
}

impl Default for Personalization {
    fn default() -> Self {
        Self {
            age_group: AgeGroup::Adults,
            topic: Topic::Technology,
        }
    }
}
