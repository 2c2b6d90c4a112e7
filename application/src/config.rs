//! Game and supply parameters
//!
//! The source variants this game descends from disagreed on batch size, retry
//! counts, round caps, and author tracking. All of those are configuration
//! here, not separate code paths.

use botlines_domain::quote::parser::MAX_BATCH_SIZE;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// How quotes are obtained for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// One provider call fetches the whole pool up front
    Batch,
    /// One quote per provider call, fetched as the game progresses
    Single,
}

impl FromStr for FetchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "batch" => Ok(FetchMode::Batch),
            "single" => Ok(FetchMode::Single),
            other => Err(format!("unknown fetch mode: {other}")),
        }
    }
}

/// Parameters for the quote supply retry policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyParams {
    /// Quotes requested per batch call (capped at 10)
    pub batch_size: usize,
    /// Attempt bound for batch fetches
    pub batch_attempts: u32,
    /// Attempt bound for single fetches
    pub single_attempts: u32,
    /// Minimum valid quotes for a batch to count as a success
    pub acceptance_threshold: usize,
    /// Defensive timeout around each provider call
    pub request_timeout: Duration,
}

impl Default for SupplyParams {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_SIZE,
            batch_attempts: 3,
            single_attempts: 5,
            acceptance_threshold: 3,
            request_timeout: Duration::from_secs(20),
        }
    }
}

/// Parameters for one game run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameParams {
    pub fetch: FetchMode,
    /// Rounds per run; `None` plays until the pool is exhausted
    pub round_cap: Option<u32>,
    /// Whether reveals include author attribution
    pub track_authors: bool,
    pub supply: SupplyParams,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            fetch: FetchMode::Batch,
            round_cap: Some(10),
            track_authors: true,
            supply: SupplyParams::default(),
        }
    }
}

impl GameParams {
    /// Clamp inconsistent settings.
    ///
    /// Single-fetch mode with no round cap would never finish, so a cap of 10
    /// is imposed there. Batch size never exceeds what the validator accepts,
    /// and the acceptance threshold never exceeds the batch size — a source
    /// that returns every quote it was asked for must count as a success.
    pub fn normalized(mut self) -> Self {
        if self.fetch == FetchMode::Single && self.round_cap.is_none() {
            self.round_cap = Some(10);
        }
        self.supply.batch_size = self.supply.batch_size.clamp(1, MAX_BATCH_SIZE);
        self.supply.acceptance_threshold =
            self.supply.acceptance_threshold.clamp(1, self.supply.batch_size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mode_without_cap_gets_one() {
        let params = GameParams {
            fetch: FetchMode::Single,
            round_cap: None,
            ..Default::default()
        }
        .normalized();
        assert_eq!(params.round_cap, Some(10));
    }

    #[test]
    fn test_batch_mode_without_cap_allowed() {
        let params = GameParams {
            round_cap: None,
            ..Default::default()
        }
        .normalized();
        assert_eq!(params.round_cap, None);
    }

    #[test]
    fn test_batch_size_clamped() {
        let mut params = GameParams::default();
        params.supply.batch_size = 50;
        let params = params.normalized();
        assert_eq!(params.supply.batch_size, MAX_BATCH_SIZE);
    }

    #[test]
    fn test_threshold_clamped_to_batch_size() {
        let mut params = GameParams::default();
        params.supply.batch_size = 2;
        let params = params.normalized();
        assert_eq!(params.supply.acceptance_threshold, 2);
    }

    #[test]
    fn test_fetch_mode_parse() {
        assert_eq!("batch".parse::<FetchMode>().unwrap(), FetchMode::Batch);
        assert_eq!(" Single ".parse::<FetchMode>().unwrap(), FetchMode::Single);
        assert!("stream".parse::<FetchMode>().is_err());
    }
}
