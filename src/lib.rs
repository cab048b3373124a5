//! Logging HTTP client library.
//!
//! Wraps a blocking transport and prints a transcript of every request and
//! response (line, protocol, headers, body) while forwarding the exchange
//! unchanged. JSON bodies are pretty-printed.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod output;
pub mod transport;

pub use client::{new_client, Client};
pub use config::LogConfig;
pub use error::{Error, Phase, Result};
pub use http::{Body, Interceptor};
pub use output::{OutputTarget, Sink};
pub use transport::{transport_fn, BlockingTransport, Transport};
