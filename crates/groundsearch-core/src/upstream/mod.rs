//! Language-model upstream.
//!
//! The core only needs two operations from a model: open a conversation and
//! send a turn on it. [`GeminiModel`] implements them against the public
//! Gemini API; tests substitute their own [`LanguageModel`].

mod client_builder;
mod gemini;
mod retry;
mod sanitize;

#[cfg(test)]
mod tests;

pub use client_builder::build_http_client;
pub use gemini::GeminiModel;
pub use retry::{determine_retry_strategy, parse_retry_delay, RetryStrategy};
pub use sanitize::sanitize_upstream_error;

use async_trait::async_trait;

use groundsearch_types::protocol::GroundingMetadata;
use groundsearch_types::SearchError;

/// One model answer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelReply {
    /// Answer text, thought parts excluded.
    pub text: String,
    /// Grounding metadata of the first candidate, if the model sent any.
    pub grounding_metadata: Option<GroundingMetadata>,
}

/// Stateful multi-turn exchange with the model.
///
/// A failed turn must leave the conversation as it was, so callers can
/// retry or continue after an error or a timeout.
#[async_trait]
pub trait Conversation: Send {
    async fn send_turn(&mut self, text: &str) -> Result<ModelReply, SearchError>;

    /// Completed turns so far.
    fn turn_count(&self) -> usize;
}

/// Opens conversations with web search enabled.
pub trait LanguageModel: Send + Sync {
    fn start_conversation(&self) -> Box<dyn Conversation>;
}
