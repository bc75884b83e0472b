//! Domain models shared by the core pipeline and the HTTP server.

mod config;
mod response;

pub use config::{AppConfig, ModelConfig, ServerConfig, SessionConfig};
pub use response::{ErrorBody, FollowUpRequest, FormattedResponse, SearchResponse, SourceEntry};
