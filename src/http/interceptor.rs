//! Logging transport decorator.
//!
//! # Responsibilities
//! - Render the request before delegating, the response after
//! - Replace drained bodies with replay bodies so downstream readers see the
//!   original bytes
//! - Skip all rendering when disabled
//!
//! # Design Decisions
//! - Holds no mutable state; `enabled` and the inner transport are fixed at
//!   construction
//! - Each phase is rendered fully in memory before the sink is touched, so a
//!   slow or sink-writing body producer never contends with the sink lock
//! - The environment is never consulted here; callers decide `enabled`

use hyper::{Request, Response};

use crate::error::{Error, Phase, Result};
use crate::http::body::Body;
use crate::http::render::{render_and_replay, render_request_head, render_response_head, Transcript};
use crate::output::Sink;
use crate::transport::Transport;

/// Wraps a [`Transport`] and writes a transcript of every exchange.
#[derive(Debug, Clone)]
pub struct Interceptor<T> {
    inner: T,
    enabled: bool,
    sink: Sink,
}

impl<T: Transport> Interceptor<T> {
    /// Wrap `inner`, writing transcripts to stdout when `enabled`.
    pub fn new(inner: T, enabled: bool) -> Self {
        Self {
            inner,
            enabled,
            sink: Sink::Stdout,
        }
    }

    pub fn with_sink(mut self, sink: Sink) -> Self {
        self.sink = sink;
        self
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Render the request in memory, swapping in a replay body. Whatever was
    /// rendered reaches the sink even when draining fails.
    fn log_request(&self, request: &mut Request<Body>) -> Result<()> {
        let mut out = Transcript::new();
        render_request_head(
            &mut out,
            request.method(),
            request.uri(),
            request.version(),
            request.headers(),
        );

        let mut result = Ok(());
        if !request.body().is_empty() {
            out.newline();
            let original = std::mem::take(request.body_mut());
            match render_and_replay(&mut out, original, request.headers()) {
                Ok(replay) => *request.body_mut() = replay,
                Err(source) => {
                    result = Err(Error::Drain {
                        phase: Phase::Request,
                        source,
                    })
                }
            }
        }

        self.sink.emit(out.as_bytes());
        result
    }

    fn log_response(&self, response: &mut Response<Body>) -> Result<()> {
        let mut out = Transcript::new();
        render_response_head(&mut out, response.version(), response.status(), response.headers());
        out.newline();

        let original = std::mem::take(response.body_mut());
        let result = match render_and_replay(&mut out, original, response.headers()) {
            Ok(replay) => {
                *response.body_mut() = replay;
                Ok(())
            }
            Err(source) => Err(Error::Drain {
                phase: Phase::Response,
                source,
            }),
        };

        self.sink.emit(out.as_bytes());
        result
    }
}

impl<T: Transport> Transport for Interceptor<T> {
    fn execute(&self, mut request: Request<Body>) -> Result<Response<Body>> {
        if !self.enabled {
            return self.inner.execute(request);
        }

        tracing::debug!(method = %request.method(), uri = %request.uri(), "logging request");
        self.log_request(&mut request)?;

        let mut response = self.inner.execute(request)?;

        tracing::debug!(status = %response.status(), "logging response");
        // On failure the response, and what is left of its stream, is dropped here.
        self.log_response(&mut response)?;

        Ok(response)
    }
}
