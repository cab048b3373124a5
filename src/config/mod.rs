//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → environment toggle (LOGHTTP_DISABLED)
//!     → LogConfig (immutable, handed to the client factory)
//! ```
//!
//! # Design Decisions
//! - Only this subsystem reads the environment; the interceptor takes a plain bool
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LogConfig, TimeoutConfig, DISABLE_ENV_VAR};
