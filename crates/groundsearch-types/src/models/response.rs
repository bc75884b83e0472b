//! Client-facing request and response shapes.

use serde::{Deserialize, Serialize};

/// One cited web source, unique by `url` within a single response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceEntry {
    pub title: String,
    pub url: String,
    /// Space-joined answer segments this source supports; empty if none.
    pub snippet: String,
}

/// Rendered answer plus its sources. Returned as-is by the follow-up endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FormattedResponse {
    /// Answer rendered to HTML.
    pub summary: String,
    pub sources: Vec<SourceEntry>,
}

/// Body of a successful initial search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub session_id: String,
    pub summary: String,
    pub sources: Vec<SourceEntry>,
}

impl SearchResponse {
    pub fn new(session_id: String, formatted: FormattedResponse) -> Self {
        Self { session_id, summary: formatted.summary, sources: formatted.sources }
    }
}

/// Follow-up request body. Fields are optional on the wire so that a
/// missing field is reported as a validation error, not a decode failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

/// Error body for every non-200 response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
