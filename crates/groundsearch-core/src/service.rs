//! InitiateSearch / ContinueSearch.
//!
//! Validation and session lookup happen before any model call. Every model
//! turn runs under the configured deadline; on expiry the in-flight request
//! is dropped and the conversation is left unchanged.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use groundsearch_types::{FormattedResponse, SearchError, SearchResponse, SessionConfig};

use crate::mappers::assemble_response;
use crate::session::{Clock, SessionStore, SystemClock};
use crate::upstream::{Conversation, LanguageModel, ModelReply};

pub type ConversationStore = SessionStore<Box<dyn Conversation>>;

pub struct SearchService {
    model: Arc<dyn LanguageModel>,
    sessions: ConversationStore,
    turn_timeout: Duration,
}

impl SearchService {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        session_config: &SessionConfig,
        turn_timeout: Duration,
    ) -> Self {
        Self::with_clock(model, session_config, turn_timeout, Arc::new(SystemClock))
    }

    pub fn with_clock(
        model: Arc<dyn LanguageModel>,
        session_config: &SessionConfig,
        turn_timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { model, sessions: SessionStore::with_clock(session_config, clock), turn_timeout }
    }

    pub fn sessions(&self) -> &ConversationStore {
        &self.sessions
    }

    /// Open a conversation, answer `query`, and keep the conversation for follow-ups.
    pub async fn initiate_search(&self, query: Option<&str>) -> Result<SearchResponse, SearchError> {
        let query = required(query, "Query parameter 'q' is required")?;

        let mut conversation = self.model.start_conversation();
        let reply = self.run_turn(conversation.send_turn(query)).await?;
        let formatted = assemble(&reply)?;

        let session_id = self.sessions.insert(conversation);
        info!(
            "Search answered with {} sources, {} live sessions",
            formatted.sources.len(),
            self.sessions.len()
        );

        Ok(SearchResponse::new(session_id, formatted))
    }

    /// Send `query` as the next turn of an existing conversation.
    pub async fn continue_search(
        &self,
        session_id: Option<&str>,
        query: Option<&str>,
    ) -> Result<FormattedResponse, SearchError> {
        const MISSING: &str = "Both sessionId and query are required";
        let session_id = required(session_id, MISSING)?;
        let query = required(query, MISSING)?;

        let handle = self
            .sessions
            .get(session_id)
            .ok_or_else(|| SearchError::SessionNotFound { session_id: session_id.to_string() })?;

        // Held across the model call so turns on one session apply in order.
        let mut conversation = handle.lock().await;
        let reply = self.run_turn(conversation.send_turn(query)).await?;
        let turns = conversation.turn_count();
        drop(conversation);

        let formatted = assemble(&reply)?;
        info!("Follow-up answered (turn {}) with {} sources", turns, formatted.sources.len());
        Ok(formatted)
    }

    async fn run_turn<F>(&self, turn: F) -> Result<ModelReply, SearchError>
    where
        F: Future<Output = Result<ModelReply, SearchError>>,
    {
        match tokio::time::timeout(self.turn_timeout, turn).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Model turn exceeded {:?}, cancelled", self.turn_timeout);
                Err(SearchError::Timeout { duration_secs: self.turn_timeout.as_secs() })
            },
        }
    }
}

fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, SearchError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SearchError::invalid(message)),
    }
}

fn assemble(reply: &ModelReply) -> Result<FormattedResponse, SearchError> {
    if reply.text.trim().is_empty() {
        return Err(SearchError::EmptyAnswer);
    }
    Ok(assemble_response(&reply.text, reply.grounding_metadata.as_ref()))
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
