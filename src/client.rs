//! Ready-to-use logging client.
//!
//! # Responsibilities
//! - Compose an [`Interceptor`] with the default blocking transport
//! - Read configuration once, at construction
//! - Offer small conveniences for common requests

use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Method, Request, Response, Uri};

use crate::config::LogConfig;
use crate::error::{Error, Result};
use crate::http::{Body, Interceptor};
use crate::output::Sink;
use crate::transport::{BlockingTransport, Transport};

/// An HTTP client whose every exchange goes through an [`Interceptor`].
#[derive(Debug, Clone)]
pub struct Client<T = BlockingTransport> {
    interceptor: Interceptor<T>,
}

/// Build a client from the environment, logging to stdout unless
/// `LOGHTTP_DISABLED` is set to a non-empty value.
pub fn new_client() -> Result<Client> {
    Client::new()
}

impl Client<BlockingTransport> {
    pub fn new() -> Result<Self> {
        Self::with_config(&LogConfig::from_env())
    }

    pub fn with_config(config: &LogConfig) -> Result<Self> {
        let transport = BlockingTransport::new(&config.timeouts)?;
        let interceptor =
            Interceptor::new(transport, config.enabled).with_sink(Sink::from(config.output));
        Ok(Self { interceptor })
    }
}

impl<T: Transport> Client<T> {
    /// Route requests through `interceptor` instead of the default transport.
    pub fn from_interceptor(interceptor: Interceptor<T>) -> Self {
        Self { interceptor }
    }

    pub fn interceptor(&self) -> &Interceptor<T> {
        &self.interceptor
    }

    pub fn execute(&self, request: Request<Body>) -> Result<Response<Body>> {
        self.interceptor.execute(request)
    }

    pub fn get(&self, uri: &str) -> Result<Response<Body>> {
        self.request(Method::GET, uri, None, Body::empty())
    }

    pub fn post(&self, uri: &str, content_type: &str, body: impl Into<Body>) -> Result<Response<Body>> {
        self.request(Method::POST, uri, Some(content_type), body.into())
    }

    fn request(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> Result<Response<Body>> {
        let uri: Uri = uri
            .parse()
            .map_err(|e| Error::InvalidRequest(format!("{}: {}", uri, e)))?;

        let mut request = Request::new(body);
        *request.method_mut() = method;
        *request.uri_mut() = uri;
        if let Some(content_type) = content_type {
            let value = HeaderValue::from_str(content_type)
                .map_err(|e| Error::InvalidRequest(format!("content type: {}", e)))?;
            request.headers_mut().insert(CONTENT_TYPE, value);
        }

        self.execute(request)
    }
}
