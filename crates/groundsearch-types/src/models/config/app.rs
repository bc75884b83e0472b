//! Application-level configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::ModelConfig;
use super::server::ServerConfig;
use super::session::SessionConfig;

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, Validate)]
pub struct AppConfig {
    /// HTTP listener and static hosting
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,
    /// Upstream language model and decoding parameters
    #[serde(default)]
    #[validate(nested)]
    pub model: ModelConfig,
    /// Conversation session retention
    #[serde(default)]
    #[validate(nested)]
    pub session: SessionConfig,
}
