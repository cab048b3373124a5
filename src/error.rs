//! Error taxonomy for the logging interceptor.
//!
//! Only failures that prevent a usable replacement body from being produced
//! surface to callers. Formatting problems are absorbed where they happen.

use std::fmt;

use thiserror::Error;

/// Which side of the exchange a body belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Request,
    Response,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Request => f.write_str("request"),
            Phase::Response => f.write_str("response"),
        }
    }
}

/// Errors returned by [`Transport::execute`](crate::transport::Transport::execute).
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a body for rendering failed. This failure mode only exists
    /// because logging drains bodies; calling the inner transport directly
    /// would not produce it.
    #[error("failed to read {phase} body: {source}")]
    Drain {
        phase: Phase,
        #[source]
        source: std::io::Error,
    },

    /// The inner transport failed. Passed through unchanged.
    #[error(transparent)]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// The request cannot be sent by the default transport.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// Wrap an arbitrary transport failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Transport(err.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}

/// Result type for interceptor operations.
pub type Result<T> = std::result::Result<T, Error>;
