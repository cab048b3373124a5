//! HTTP transcript subsystem.
//!
//! # Data Flow
//! ```text
//! Request<Body>
//!     → interceptor.rs (gate on `enabled`)
//!     → render.rs (head + body, replay body swapped in)
//!     → json.rs (pretty-print when the content type is JSON)
//!     → inner Transport
//!     → render.rs (response head + body, replay body swapped in)
//!     → Response<Body> to caller
//! ```

pub mod body;
pub mod interceptor;
pub mod json;
pub mod render;

pub use body::Body;
pub use interceptor::Interceptor;
