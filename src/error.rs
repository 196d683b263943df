use std::io;
use thiserror::Error;

/// A log line that does not fit the UFW kernel-log shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line has no leading timestamp")]
    MissingTimestamp,

    #[error("unparseable timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("line has no bracketed action tag")]
    MissingAction,

    #[error("invalid port {key}={value}")]
    InvalidPort { key: String, value: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value-based criterion was switched on without a value to compare against.
    #[error("{0} is enabled but no comparison value was given")]
    MissingValue(&'static str),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
