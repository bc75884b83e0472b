//! Test helpers for groundsearch-server unit tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use groundsearch_core::{Conversation, LanguageModel, ModelReply, SearchService};
use groundsearch_types::protocol::{GroundingChunk, GroundingMetadata, GroundingSupport};
use groundsearch_types::{AppConfig, SearchError};

use crate::state::AppState;

/// Model that answers every turn with a fixed outline of the prompt, or
/// fails every turn with `failure`.
#[derive(Default)]
pub struct StubModel {
    failure: Option<SearchError>,
}

struct StubConversation {
    failure: Option<SearchError>,
    turns: usize,
}

#[async_trait]
impl Conversation for StubConversation {
    async fn send_turn(&mut self, text: &str) -> Result<ModelReply, SearchError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.turns += 1;
        Ok(ModelReply {
            text: format!("Overview:\n• turn {} about {}", self.turns, text),
            grounding_metadata: Some(GroundingMetadata {
                grounding_chunks: Some(vec![GroundingChunk::web("https://example.com", "Example")]),
                grounding_supports: Some(vec![GroundingSupport::new(text, vec![0])]),
                ..Default::default()
            }),
        })
    }

    fn turn_count(&self) -> usize {
        self.turns
    }
}

impl LanguageModel for StubModel {
    fn start_conversation(&self) -> Box<dyn Conversation> {
        Box::new(StubConversation { failure: self.failure.clone(), turns: 0 })
    }
}

/// Create an `AppState` backed by a model that always answers.
pub fn test_app_state() -> AppState {
    app_state_with(StubModel::default(), AppConfig::default())
}

/// Create an `AppState` whose model fails every turn with `err`.
pub fn failing_app_state(err: SearchError) -> AppState {
    app_state_with(StubModel { failure: Some(err) }, AppConfig::default())
}

pub fn app_state_with(model: StubModel, config: AppConfig) -> AppState {
    let service =
        SearchService::new(Arc::new(model), &config.session, Duration::from_secs(5));
    AppState::new(service, config)
}
