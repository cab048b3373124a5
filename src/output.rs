//! Output sink for rendered transcripts.
//!
//! # Responsibilities
//! - Route transcript bytes to stdout, stderr, or a caller-supplied writer
//! - Write one fully rendered transcript phase at a time
//!
//! # Design Decisions
//! - Phases are rendered into memory first; the sink is locked only for the
//!   final write, never while a body is being read
//! - Two phases never interleave on one sink. Separate phases of concurrent
//!   calls still may.
//! - Poisoned locks are recovered; a panic elsewhere must not silence logging
//! - Write failures are logged and swallowed

use std::io::{self, StderrLock, StdoutLock, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

/// Where transcripts are written.
#[derive(Clone, Default)]
pub enum Sink {
    #[default]
    Stdout,
    Stderr,
    Writer(Arc<Mutex<dyn Write + Send>>),
}

/// Configurable sink selection (`output = "stdout" | "stderr"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
}

impl From<OutputTarget> for Sink {
    fn from(target: OutputTarget) -> Self {
        match target {
            OutputTarget::Stdout => Sink::Stdout,
            OutputTarget::Stderr => Sink::Stderr,
        }
    }
}

impl Sink {
    /// Share a writer between the sink and its owner.
    pub fn writer<W>(writer: Arc<Mutex<W>>) -> Self
    where
        W: Write + Send + 'static,
    {
        Sink::Writer(writer)
    }

    /// Write one rendered phase in a single locked write.
    /// Returns whether the write succeeded.
    pub fn emit(&self, phase: &[u8]) -> bool {
        let mut out = self.lock();
        match out.write_all(phase).and_then(|_| out.flush()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, sink = ?self, "failed to write HTTP transcript");
                false
            }
        }
    }

    fn lock(&self) -> SinkGuard<'_> {
        match self {
            Sink::Stdout => SinkGuard::Stdout(io::stdout().lock()),
            Sink::Stderr => SinkGuard::Stderr(io::stderr().lock()),
            Sink::Writer(writer) => {
                SinkGuard::Writer(writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
            }
        }
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sink::Stdout => f.write_str("Sink::Stdout"),
            Sink::Stderr => f.write_str("Sink::Stderr"),
            Sink::Writer(_) => f.write_str("Sink::Writer(..)"),
        }
    }
}

enum SinkGuard<'a> {
    Stdout(StdoutLock<'static>),
    Stderr(StderrLock<'static>),
    Writer(MutexGuard<'a, dyn Write + Send + 'static>),
}

impl Write for SinkGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SinkGuard::Stdout(out) => out.write(buf),
            SinkGuard::Stderr(out) => out.write(buf),
            SinkGuard::Writer(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SinkGuard::Stdout(out) => out.flush(),
            SinkGuard::Stderr(out) => out.flush(),
            SinkGuard::Writer(out) => out.flush(),
        }
    }
}
