//! Default transport over `reqwest`'s blocking client.

use std::time::Duration;

use hyper::{Request, Response};
use url::Url;

use crate::config::TimeoutConfig;
use crate::error::{Error, Result};
use crate::http::body::Body;
use crate::transport::Transport;

/// Executes requests with a pooled `reqwest::blocking::Client`.
///
/// Must not be created or dropped from inside an async runtime; run it on a
/// plain thread or under `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct BlockingTransport {
    client: reqwest::blocking::Client,
}

impl BlockingTransport {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    fn convert_request(&self, request: Request<Body>) -> Result<reqwest::blocking::Request> {
        let (parts, body) = request.into_parts();

        let url = Url::parse(&parts.uri.to_string())
            .map_err(|e| Error::InvalidRequest(format!("{}: {}", parts.uri, e)))?;

        let mut outbound = reqwest::blocking::Request::new(parts.method, url);
        *outbound.headers_mut() = parts.headers;
        *outbound.version_mut() = parts.version;
        *outbound.body_mut() = match body {
            Body::Empty => None,
            // Known length, sent with Content-Length instead of chunked.
            Body::Replay(_) => {
                let bytes = body
                    .into_bytes()
                    .map_err(|e| Error::InvalidRequest(format!("unreadable request body: {}", e)))?;
                Some(reqwest::blocking::Body::from(bytes.to_vec()))
            }
            stream => Some(reqwest::blocking::Body::new(stream)),
        };

        Ok(outbound)
    }
}

impl Transport for BlockingTransport {
    fn execute(&self, request: Request<Body>) -> Result<Response<Body>> {
        let outbound = self.convert_request(request)?;
        let inbound = self.client.execute(outbound)?;

        let mut response = Response::new(Body::empty());
        *response.status_mut() = inbound.status();
        *response.version_mut() = inbound.version();
        *response.headers_mut() = inbound.headers().clone();
        *response.body_mut() = Body::from_reader(inbound);

        Ok(response)
    }
}
