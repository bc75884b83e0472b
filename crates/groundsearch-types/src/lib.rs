//! # Groundsearch Types
//!
//! Core types, models, and error definitions for Groundsearch.
//!
//! - **`error`** - Typed error taxonomy for search requests and configuration
//! - **`models`** - Response shapes returned to the browser client, plus config
//! - **`protocol`** - Gemini `generateContent` wire types, including grounding metadata
//!
//! ```text
//!          groundsearch-types (this crate)
//!                    │
//!                    ▼
//!           groundsearch-core
//!                    │
//!                    ▼
//!          groundsearch-server
//! ```

pub mod error;
pub mod models;
pub mod protocol;

pub use error::{ConfigError, SearchError};

pub use models::{
    AppConfig, ErrorBody, FollowUpRequest, FormattedResponse, ModelConfig, SearchResponse,
    ServerConfig, SessionConfig, SourceEntry,
};
