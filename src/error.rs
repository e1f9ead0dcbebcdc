use std::io;
use thiserror::Error;

/// Custom error type for the barline application
#[derive(Error, Debug)]
pub enum BarlineError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Status sink unavailable: {0}")]
    SinkUnavailable(String),

    #[error("Metric unavailable: {0}")]
    MetricUnavailable(String),

    #[error("Notifier unavailable: {0}")]
    NotifierUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for the barline application
pub type Result<T> = std::result::Result<T, BarlineError>;

impl BarlineError {
    /// Create a sink error
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        BarlineError::SinkUnavailable(msg.into())
    }

    /// Create a metric error
    pub fn metric<S: Into<String>>(msg: S) -> Self {
        BarlineError::MetricUnavailable(msg.into())
    }

    /// Create a notifier error
    pub fn notifier<S: Into<String>>(msg: S) -> Self {
        BarlineError::NotifierUnavailable(msg.into())
    }
}
