//! Tween engine error types

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML document could not be parsed
    #[error("Failed to parse scheduler config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Time scale must be finite and non-negative
    #[error("Invalid time scale: {0}")]
    InvalidTimeScale(f32),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
