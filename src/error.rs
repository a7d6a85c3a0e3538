//! Error types for rxlsp.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading settings or building a scanner from them.
///
/// Scanning itself never fails; these only surface at configuration time.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has the wrong shape.
    #[error("failed to parse rxlsp.toml: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configured block markers cannot be used together.
    #[error("invalid block markers: {0}")]
    InvalidMarkers(String),

    /// A marker could not be compiled into a line pattern.
    #[error("invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
