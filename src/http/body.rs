//! Once-readable message bodies.
//!
//! # Responsibilities
//! - Represent an absent body, an opaque single-use stream, or a replay buffer
//! - Close the underlying stream when the body is dropped
//!
//! # Design Decisions
//! - A replay buffer owns its bytes and its cursor; nothing is shared with the
//!   stream it replaced
//! - `Bytes` keeps clones of the buffer cheap for transports that need an owned copy

use std::fmt;
use std::io::{self, Cursor, Read};

use bytes::Bytes;

/// A request or response body that can be read exactly once.
#[derive(Default)]
pub enum Body {
    /// No body at all.
    #[default]
    Empty,
    /// An opaque stream owned by the caller or produced by a transport.
    Stream(Box<dyn Read + Send>),
    /// A fresh stream over bytes that were already drained from another body.
    Replay(Cursor<Bytes>),
}

impl Body {
    pub fn empty() -> Self {
        Body::Empty
    }

    /// Wrap an arbitrary reader. The reader is dropped (closed) with the body.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Body::Stream(Box::new(reader))
    }

    /// Build a replay body yielding exactly `bytes`.
    pub fn replay(bytes: impl Into<Bytes>) -> Self {
        Body::Replay(Cursor::new(bytes.into()))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    /// Whether this body was reconstructed from a drained stream.
    pub fn is_replay(&self) -> bool {
        matches!(self, Body::Replay(_))
    }

    /// Drain the whole body into memory, consuming it.
    pub fn into_bytes(mut self) -> io::Result<Bytes> {
        if let Body::Replay(cursor) = self {
            let position = cursor.position();
            let bytes = cursor.into_inner();
            // The cursor may have been seeked past the end.
            let start = usize::try_from(position).unwrap_or(usize::MAX).min(bytes.len());
            return Ok(bytes.slice(start..));
        }

        let mut buf = Vec::new();
        self.read_to_end(&mut buf)?;
        Ok(Bytes::from(buf))
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Body::Empty => Ok(0),
            Body::Stream(reader) => reader.read(buf),
            Body::Replay(cursor) => cursor.read(buf),
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Body::Empty"),
            Body::Stream(_) => f.write_str("Body::Stream(..)"),
            Body::Replay(cursor) => f
                .debug_struct("Body::Replay")
                .field("len", &cursor.get_ref().len())
                .field("position", &cursor.position())
                .finish(),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::replay(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::replay(bytes)
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::replay(s.into_bytes())
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Body::replay(Bytes::from_static(s.as_bytes()))
    }
}
