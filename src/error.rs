//! Error types for thermo-monitor operations.
//!
//! Every core error is channel-scoped: a failure while building one channel's
//! view never touches the other channel's buffer.

use std::io;
use thiserror::Error;

use crate::channel::Channel;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in thermo-monitor operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No reading has been recorded for the channel yet.
    #[error("no readings recorded yet for the {channel} channel")]
    EmptyBuffer {
        /// Channel whose buffer was empty.
        channel: Channel,
    },

    /// Fewer than two rows were available for a line fit.
    #[error("insufficient data for a trend line: {rows} row(s), at least 2 required")]
    InsufficientData {
        /// Number of rows that were provided.
        rows: usize,
    },

    /// The least-squares system has no unique solution.
    #[error("degenerate fit: least-squares denominator is zero or not finite")]
    DegenerateFit,

    /// A channel name outside {day, night}.
    #[error("unknown channel '{0}', expected 'day' or 'night'")]
    UnknownChannel(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },

    /// Terminal initialization or rendering error.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl Error {
    /// Returns true when a display surface should degrade instead of failing.
    ///
    /// An empty buffer means "render a waiting state"; too few points or a
    /// degenerate fit mean "render the table without a trend line".
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EmptyBuffer { .. } | Self::InsufficientData { .. } | Self::DegenerateFit
        )
    }

    pub(crate) fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            key: key.into(),
            message: message.into(),
        }
    }
}
