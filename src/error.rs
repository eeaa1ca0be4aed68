//! Error types for pathgate
//!
//! All failures happen while building a validator. Queries against a built
//! validator are total and never return an error.

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration source could not be opened or read
    #[error("Could not read {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration source is not decodable into the expected shape
    #[error("Could not parse {source_name}: {reason}")]
    Decode { source_name: String, reason: String },

    /// A path pattern does not compile as a regular expression
    #[error("Invalid path pattern '{pattern}' in group '{group}': {reason}")]
    InvalidPattern {
        group: String,
        pattern: String,
        reason: String,
    },

    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn read(source_name: impl Into<String>, source: std::io::Error) -> Self {
        Self::Read {
            source_name: source_name.into(),
            source,
        }
    }

    pub fn decode(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// True for failures to reach the configuration source at all
    pub fn is_source_read(&self) -> bool {
        matches!(self, ConfigError::Read { .. })
    }
}

/// Result type alias for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
