//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application parameter
//! types after validation.

use botlines_application::config::{FetchMode, GameParams, SupplyParams};
use botlines_domain::{AgeGroup, Personalization, Topic};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("unknown fetch mode: {0} (expected \"batch\" or \"single\")")]
    InvalidFetchMode(String),

    #[error("unknown quote provider: {0} (expected \"builtin\" or \"bedrock\")")]
    InvalidProvider(String),

    #[error("invalid personalization: {0}")]
    InvalidPersonalization(String),

    #[error("request_timeout_secs cannot be 0")]
    InvalidTimeout,
}

/// Raw game configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    /// Fetch mode: "batch" or "single"
    pub mode: String,
    /// Rounds per run; omit to play until the pool is exhausted
    pub round_cap: Option<u32>,
    /// Quotes requested per batch call
    pub batch_size: usize,
    /// Attempt bound for batch fetches
    pub batch_attempts: u32,
    /// Attempt bound for single fetches
    pub single_attempts: u32,
    /// Minimum valid quotes for a usable batch
    pub acceptance_threshold: usize,
    /// Per-attempt provider timeout in seconds
    pub request_timeout_secs: u64,
    /// Include author attribution in reveals
    pub track_authors: bool,
}

impl Default for FileGameConfig {
    fn default() -> Self {
        let supply = SupplyParams::default();
        Self {
            mode: "batch".to_string(),
            round_cap: Some(10),
            batch_size: supply.batch_size,
            batch_attempts: supply.batch_attempts,
            single_attempts: supply.single_attempts,
            acceptance_threshold: supply.acceptance_threshold,
            request_timeout_secs: supply.request_timeout.as_secs(),
            track_authors: true,
        }
    }
}

impl FileGameConfig {
    /// Convert to validated, normalized game parameters
    pub fn to_game_params(&self) -> Result<GameParams, ConfigValidationError> {
        let fetch: FetchMode = self
            .mode
            .parse()
            .map_err(|_| ConfigValidationError::InvalidFetchMode(self.mode.clone()))?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        Ok(GameParams {
            fetch,
            round_cap: self.round_cap,
            track_authors: self.track_authors,
            supply: SupplyParams {
                batch_size: self.batch_size,
                batch_attempts: self.batch_attempts,
                single_attempts: self.single_attempts,
                acceptance_threshold: self.acceptance_threshold,
                request_timeout: Duration::from_secs(self.request_timeout_secs),
            },
        }
        .normalized())
    }
}

/// Raw quote source configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSourceConfig {
    /// Provider name: "builtin" or "bedrock"
    pub provider: String,
    /// AWS Bedrock settings (used when provider = "bedrock")
    pub bedrock: FileBedrockConfig,
}

impl Default for FileSourceConfig {
    fn default() -> Self {
        Self {
            provider: "builtin".to_string(),
            bedrock: FileBedrockConfig::default(),
        }
    }
}

/// Raw AWS Bedrock settings from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBedrockConfig {
    /// AWS region
    pub region: String,
    /// AWS profile name for credentials
    pub profile: Option<String>,
    /// Bedrock model identifier
    pub model_id: String,
    /// Max tokens per response
    pub max_tokens: i32,
}

impl Default for FileBedrockConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            profile: None,
            model_id: "anthropic.claude-3-haiku-20240307-v1:0".to_string(),
            max_tokens: 1024,
        }
    }
}

/// Raw default personalization from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePersonalizationConfig {
    pub age_group: String,
    pub topic: String,
}

impl Default for FilePersonalizationConfig {
    fn default() -> Self {
        let p = Personalization::default();
        Self {
            age_group: p.age_group.as_str().to_string(),
            topic: p.topic.as_str().to_string(),
        }
    }
}

impl FilePersonalizationConfig {
    pub fn to_personalization(&self) -> Result<Personalization, ConfigValidationError> {
        let age_group: AgeGroup = self
            .age_group
            .parse()
            .map_err(|e| ConfigValidationError::InvalidPersonalization(format!("{e}")))?;
        let topic: Topic = self
            .topic
            .parse()
            .map_err(|e| ConfigValidationError::InvalidPersonalization(format!("{e}")))?;
        Ok(Personalization::new(age_group, topic))
    }
}

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub game: FileGameConfig,
    pub source: FileSourceConfig,
    pub personalization: FilePersonalizationConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FileConfig::default();
        let params = config.game.to_game_params().unwrap();
        assert_eq!(params.fetch, FetchMode::Batch);
        assert_eq!(params.round_cap, Some(10));
        let p = config.personalization.to_personalization().unwrap();
        assert_eq!(p, Personalization::default());
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let config = FileGameConfig {
            mode: "streaming".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.to_game_params(),
            Err(ConfigValidationError::InvalidFetchMode(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = FileGameConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.to_game_params(),
            Err(ConfigValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
            [game]
            mode = "single"
            round_cap = 5
            track_authors = false

            [source]
            provider = "bedrock"

            [source.bedrock]
            region = "eu-west-1"
            model_id = "anthropic.claude-3-sonnet-20240229-v1:0"

            [personalization]
            age_group = "teens"
            topic = "humor"
        "#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let params = config.game.to_game_params().unwrap();
        assert_eq!(params.fetch, FetchMode::Single);
        assert_eq!(params.round_cap, Some(5));
        assert!(!params.track_authors);
        assert_eq!(config.source.provider, "bedrock");
        assert_eq!(config.source.bedrock.region, "eu-west-1");
        let p = config.personalization.to_personalization().unwrap();
        assert_eq!(p.age_group, AgeGroup::Teens);
        assert_eq!(p.topic, Topic::Humor);
    }
}
