//! Upstream model configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Gemini endpoint, credentials and decoding parameters.
///
/// The API key is never read from source; it comes from the config file
/// or the `GEMINI_API_KEY` / `GOOGLE_API_KEY` environment variables and is
/// skipped when the config is serialized back out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct ModelConfig {
    /// API base, e.g. `https://generativelanguage.googleapis.com/v1beta`
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name used in `models/{model}:generateContent`
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[validate(range(min = 0.0_f32, max = 2.0_f32))]
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[validate(range(min = 0.0_f32, max = 1.0_f32))]
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[validate(range(min = 1_u32))]
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[validate(range(min = 1_u32, max = 65536_u32))]
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Per-turn timeout in seconds, retries included
    #[validate(range(min = 1_u64, max = 3600_u64))]
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Extra attempts on transient upstream failures
    #[validate(range(max = 10_u32))]
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay for exponential backoff between retries
    #[serde(default = "default_retry_base_ms")]
    pub retry_base_ms: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: String::new(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: default_request_timeout(),
            max_retries: default_max_retries(),
            retry_base_ms: default_retry_base_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_temperature() -> f32 {
    0.9
}

fn default_top_p() -> f32 {
    1.0
}

fn default_top_k() -> u32 {
    1
}

fn default_max_output_tokens() -> u32 {
    2048
}

fn default_request_timeout() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_base_ms() -> u64 {
    500
}
