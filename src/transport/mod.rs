//! Request execution subsystem.
//!
//! # Data Flow
//! ```text
//! Client::execute
//!     → Interceptor (render request)
//!     → Transport::execute (blocking.rs by default, or any test double)
//!     → Interceptor (render response)
//!     → caller
//! ```
//!
//! # Design Decisions
//! - One synchronous operation; no retries, timeouts or cancellation added here
//! - Implemented for `&T`, `Box<T>` and `Arc<T>` so transports can be shared
//! - Closures plug in through `transport_fn`, the way `service_fn` does for services

pub mod blocking;

use std::sync::Arc;

use hyper::{Request, Response};

use crate::error::Result;
use crate::http::body::Body;

pub use blocking::BlockingTransport;

/// Send a request, obtain a response.
pub trait Transport: Send + Sync {
    fn execute(&self, request: Request<Body>) -> Result<Response<Body>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: Request<Body>) -> Result<Response<Body>> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: Request<Body>) -> Result<Response<Body>> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: Request<Body>) -> Result<Response<Body>> {
        (**self).execute(request)
    }
}

/// A [`Transport`] backed by a closure. See [`transport_fn`].
#[derive(Clone, Copy)]
pub struct TransportFn<F> {
    f: F,
}

/// Turn `f` into a [`Transport`].
pub fn transport_fn<F>(f: F) -> TransportFn<F>
where
    F: Fn(Request<Body>) -> Result<Response<Body>> + Send + Sync,
{
    TransportFn { f }
}

impl<F> Transport for TransportFn<F>
where
    F: Fn(Request<Body>) -> Result<Response<Body>> + Send + Sync,
{
    fn execute(&self, request: Request<Body>) -> Result<Response<Body>> {
        (self.f)(request)
    }
}

impl<F> std::fmt::Debug for TransportFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportFn").finish_non_exhaustive()
    }
}
