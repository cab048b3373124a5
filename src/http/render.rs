//! Transcript rendering and body replay.
//!
//! # Responsibilities
//! - Write request/response heads (line, protocol, headers)
//! - Drain a body exactly once, render it, and return an equivalent replay body
//! - Choose JSON pretty-printing from the content type
//!
//! # Design Decisions
//! - The whole body is buffered before anything is written
//! - The replay body always carries the drained bytes, never the rendering
//! - Rendering happens in memory; the output sink is never held while a body
//!   stream is being read

use std::fmt;
use std::io::{self, Read, Write};

use bytes::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{HeaderMap, Method, StatusCode, Uri, Version};

use crate::http::body::Body;
use crate::http::json::format_json;

/// One transcript phase, rendered in memory.
///
/// Bodies are drained while rendering, so nothing here touches the output
/// sink; the finished phase is handed to [`Sink::emit`](crate::output::Sink::emit).
#[derive(Debug, Default)]
pub struct Transcript {
    buf: Vec<u8>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write formatted text followed by a newline.
    pub fn line(&mut self, args: fmt::Arguments<'_>) {
        // Writing into a Vec cannot fail.
        let _ = self.buf.write_fmt(args);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.buf.push(b'\n');
    }

    /// Write bytes verbatim.
    pub fn raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// One `name: value` line per header value, in map order.
    pub fn headers(&mut self, headers: &HeaderMap) {
        for (name, value) in headers {
            self.raw(name.as_str().as_bytes());
            self.raw(b": ");
            self.raw(value.as_bytes());
            self.newline();
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

/// `METHOD /path?query HTTP/x.y` followed by the headers.
pub fn render_request_head(
    out: &mut Transcript,
    method: &Method,
    uri: &Uri,
    version: Version,
    headers: &HeaderMap,
) {
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    out.line(format_args!("{} {} {:?}", method, target, version));
    out.headers(headers);
}

/// `HTTP/x.y CODE Reason` followed by the headers.
pub fn render_response_head(
    out: &mut Transcript,
    version: Version,
    status: StatusCode,
    headers: &HeaderMap,
) {
    out.line(format_args!("{:?} {}", version, status));
    out.headers(headers);
}

/// Drain `original`, render its contents, and hand back a replay body over
/// the same bytes.
///
/// The original stream is closed before returning, whether or not draining
/// succeeded. On a read error no replay body is produced.
pub fn render_and_replay(
    out: &mut Transcript,
    original: Body,
    headers: &HeaderMap,
) -> io::Result<Body> {
    let bytes = drain(original)?;

    if is_json(headers) {
        format_json(out, &bytes);
    } else {
        out.raw(&bytes);
        out.newline();
    }

    Ok(Body::replay(bytes))
}

fn drain(mut original: Body) -> io::Result<Bytes> {
    let mut buf = Vec::new();
    let result = original.read_to_end(&mut buf);
    drop(original);
    result.map(|_| Bytes::from(buf))
}

/// Whether the first `Content-Type` header names a JSON media type.
pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(is_json_media_type)
        .unwrap_or(false)
}

/// Matches `application/json` and `application/*+json`, ignoring parameters
/// and ASCII case.
fn is_json_media_type(value: &str) -> bool {
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}
