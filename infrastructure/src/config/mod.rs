//! Configuration file loading for botlines
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./botlines.toml` or `./.botlines.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/botlines/config.toml`
//! 4. Fallback: `~/.config/botlines/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBedrockConfig, FileConfig, FileGameConfig,
    FilePersonalizationConfig, FileSourceConfig,
};
pub use loader::ConfigLoader;
