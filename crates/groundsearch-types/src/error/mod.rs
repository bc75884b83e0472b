//! Typed error definitions for Groundsearch.
//!
//! Request-path failures are [`SearchError`]; startup failures are
//! [`ConfigError`]. Both serialize with serde so they can be logged or
//! shipped as structured data.

mod config;
mod search;

pub use config::ConfigError;
pub use search::SearchError;
