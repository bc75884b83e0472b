//! Gemini `generateContent` client with the `google_search` tool enabled.
//!
//! A conversation is the accumulated `contents` history; every turn resends
//! it. The user turn and the model answer are appended only after a
//! successful, non-empty reply.

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use groundsearch_types::protocol::{
    GeminiContent, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Tool,
};
use groundsearch_types::{ConfigError, ModelConfig, SearchError};

use super::retry::{apply_retry_strategy, determine_retry_strategy};
use super::sanitize::sanitize_upstream_error;
use super::{Conversation, LanguageModel, ModelReply};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub(crate) fn build_generate_url(base_url: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", base_url.trim_end_matches('/'), model)
}

/// Failure of a single HTTP attempt, before sanitizing.
enum AttemptError {
    Transport(String),
    Status { status: u16, body: String },
    Decode(String),
}

impl AttemptError {
    fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Status { body, .. } => body,
            Self::Transport(msg) | Self::Decode(msg) => msg,
        }
    }

    fn into_search_error(self) -> SearchError {
        match self {
            Self::Transport(cause) => {
                SearchError::upstream(format!("Upstream request failed: {}", cause))
            },
            Self::Status { status, body } => {
                SearchError::UpstreamStatus { status, message: sanitize_upstream_error(status, &body) }
            },
            Self::Decode(cause) => {
                SearchError::upstream(format!("Invalid response from model API: {}", cause))
            },
        }
    }
}

struct GeminiEndpoint {
    http: Client,
    url: String,
    api_key: String,
    generation_config: GenerationConfig,
    max_retries: u32,
    retry_base_ms: u64,
}

impl GeminiEndpoint {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, SearchError> {
        let trace_id = trace_id();
        let mut attempt = 0_u32;
        loop {
            let failure = match self.post_once(request).await {
                Ok(response) => return Ok(response),
                Err(failure) => failure,
            };

            warn!(
                "[{}] Gemini attempt {} failed (status {:?}): {}",
                trace_id,
                attempt + 1,
                failure.status(),
                failure.text()
            );

            let strategy =
                determine_retry_strategy(failure.status(), failure.text(), self.retry_base_ms);
            if attempt >= self.max_retries
                || !apply_retry_strategy(&strategy, attempt, self.max_retries, &trace_id).await
            {
                error!("[{}] Gemini request failed after {} attempt(s)", trace_id, attempt + 1);
                return Err(failure.into_search_error());
            }
            attempt += 1;
        }
    }

    async fn post_once(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AttemptError> {
        let response = self
            .http
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AttemptError::Transport(error_chain(&e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AttemptError::Transport(error_chain(&e.without_url())))?;

        if !status.is_success() {
            return Err(AttemptError::Status { status: status.as_u16(), body });
        }

        debug!("Raw Gemini response: {}", body);
        serde_json::from_str(&body).map_err(|e| AttemptError::Decode(e.to_string()))
    }
}

/// Gemini-backed [`LanguageModel`].
#[derive(Clone)]
pub struct GeminiModel {
    endpoint: Arc<GeminiEndpoint>,
}

impl GeminiModel {
    pub fn new(http: Client, config: &ModelConfig) -> Result<Self, ConfigError> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        let url = build_generate_url(&config.base_url, &config.model);
        url::Url::parse(&url).map_err(|e| ConfigError::ValidationError {
            message: format!("model.base_url: {}", e),
        })?;

        info!("Gemini model configured: {}", config.model);

        Ok(Self {
            endpoint: Arc::new(GeminiEndpoint {
                http,
                url,
                api_key: config.api_key.clone(),
                generation_config: GenerationConfig {
                    temperature: config.temperature,
                    top_p: config.top_p,
                    top_k: config.top_k,
                    max_output_tokens: config.max_output_tokens,
                },
                max_retries: config.max_retries,
                retry_base_ms: config.retry_base_ms,
            }),
        })
    }
}

impl LanguageModel for GeminiModel {
    fn start_conversation(&self) -> Box<dyn Conversation> {
        Box::new(GeminiConversation { endpoint: Arc::clone(&self.endpoint), history: Vec::new() })
    }
}

/// Accumulated `contents` of one conversation.
struct GeminiConversation {
    endpoint: Arc<GeminiEndpoint>,
    history: Vec<GeminiContent>,
}

#[async_trait]
impl Conversation for GeminiConversation {
    async fn send_turn(&mut self, text: &str) -> Result<ModelReply, SearchError> {
        let mut contents = Vec::with_capacity(self.history.len() + 1);
        contents.extend_from_slice(&self.history);
        contents.push(GeminiContent::user_text(text));

        let request = GenerateContentRequest {
            contents,
            tools: vec![Tool::google_search()],
            generation_config: Some(self.endpoint.generation_config.clone()),
        };

        let response = self.endpoint.generate(&request).await?;

        let Some(candidate) = response.first_candidate() else {
            let reason = response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
                .unwrap_or("no candidates returned");
            return Err(SearchError::upstream(format!("Model returned no answer: {}", reason)));
        };

        let answer = candidate.content.as_ref().map(GeminiContent::joined_text).unwrap_or_default();
        if answer.trim().is_empty() {
            return Err(SearchError::EmptyAnswer);
        }

        let grounding_metadata = candidate.grounding_metadata.clone();
        debug!(
            "Gemini answer: {} chars, {} grounding chunks",
            answer.len(),
            grounding_metadata.as_ref().map_or(0, |m| m.chunks().len())
        );

        let mut contents = request.contents;
        contents.push(GeminiContent::model_text(answer.clone()));
        self.history = contents;

        Ok(ModelReply { text: answer, grounding_metadata })
    }

    fn turn_count(&self) -> usize {
        self.history.len() / 2
    }
}

/// `Display` of `err` followed by each of its sources, joined with `": "`.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn trace_id() -> String {
    rand::thread_rng().sample_iter(&Alphanumeric).take(8).map(char::from).collect()
}
