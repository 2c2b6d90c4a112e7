//! Infrastructure layer for botlines
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: quote source implementations and configuration file
//! loading.

pub mod config;
pub mod sources;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBedrockConfig, FileConfig, FileGameConfig,
    FilePersonalizationConfig, FileSourceConfig,
};
pub use sources::builtin::BuiltinQuoteSource;

#[cfg(feature = "bedrock")]
pub use sources::bedrock::{BedrockQuoteSource, BedrockSourceConfig};
