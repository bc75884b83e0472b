//! # Groundsearch Core
//!
//! Everything between an HTTP handler and the model API.
//!
//! ```text
//! groundsearch-core/src/
//! ├── mappers/    # raw answer -> HTML, grounding metadata -> sources
//! ├── session/    # TTL/LRU bounded conversation store
//! ├── upstream/   # Gemini conversation handles, retry, error sanitizing
//! ├── modules/    # config loading
//! └── service.rs  # InitiateSearch / ContinueSearch
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod mappers;
pub mod modules;
pub mod service;
pub mod session;
pub mod upstream;

pub use mappers::{assemble_response, extract_sources, format_response};
pub use service::SearchService;
pub use session::{SessionHandle, SessionStore};
pub use upstream::{Conversation, GeminiModel, LanguageModel, ModelReply};
