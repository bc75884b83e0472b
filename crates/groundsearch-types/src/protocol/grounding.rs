//! Grounding metadata types for web search augmented responses.
//!
//! Every field is optional: the model omits pieces freely, and consumers
//! skip what is missing instead of rejecting the response.

use serde::{Deserialize, Serialize};

/// Metadata about grounding sources used in a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    /// Web search queries that were executed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_search_queries: Option<Vec<String>>,
    /// Chunks of grounding information from web sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
    /// Support information linking response to sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grounding_supports: Option<Vec<GroundingSupport>>,
    /// Entry point for search results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_entry_point: Option<SearchEntryPoint>,
}

impl GroundingMetadata {
    pub fn chunks(&self) -> &[GroundingChunk] {
        self.grounding_chunks.as_deref().unwrap_or_default()
    }

    pub fn supports(&self) -> &[GroundingSupport] {
        self.grounding_supports.as_deref().unwrap_or_default()
    }
}

/// A chunk of grounding information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GroundingChunk {
    /// Web source for this chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

impl GroundingChunk {
    pub fn web(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self { web: Some(WebSource { uri: Some(uri.into()), title: Some(title.into()) }) }
    }
}

/// A web source used for grounding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WebSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Support information linking response segments to sources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroundingSupport {
    /// Text segment in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<TextSegment>,
    /// Indices of grounding chunks that support this segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grounding_chunk_indices: Option<Vec<i32>>,
    /// Confidence scores for each supporting chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_scores: Option<Vec<f64>>,
}

impl GroundingSupport {
    pub fn new(text: impl Into<String>, indices: Vec<i32>) -> Self {
        Self {
            segment: Some(TextSegment { start_index: None, end_index: None, text: Some(text.into()) }),
            grounding_chunk_indices: Some(indices),
            confidence_scores: None,
        }
    }

    /// Whether this support cites the chunk at `position`.
    pub fn cites(&self, position: usize) -> bool {
        self.grounding_chunk_indices
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|&idx| usize::try_from(idx).is_ok_and(|idx| idx == position))
    }

    pub fn text(&self) -> Option<&str> {
        self.segment.as_ref().and_then(|s| s.text.as_deref())
    }
}

/// A segment of text in the response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextSegment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Entry point for search results display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntryPoint {
    /// Rendered HTML content for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered_content: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_metadata() {
        let metadata: GroundingMetadata = serde_json::from_value(serde_json::json!({
            "groundingChunks": [
                {"web": {"uri": "https://a.example", "title": "A"}},
                {}
            ],
            "groundingSupports": [
                {"segment": {"startIndex": 0, "endIndex": 5, "text": "Hello"},
                 "groundingChunkIndices": [0], "confidenceScores": [0.9]},
                {"groundingChunkIndices": [1]}
            ]
        }))
        .unwrap();

        assert_eq!(metadata.chunks().len(), 2);
        assert!(metadata.chunks()[1].web.is_none());
        assert_eq!(metadata.supports()[0].text(), Some("Hello"));
        assert_eq!(metadata.supports()[1].text(), None);
    }

    #[test]
    fn test_cites_ignores_negative_and_missing_indices() {
        assert!(GroundingSupport::new("x", vec![-1, 2]).cites(2));
        assert!(!GroundingSupport::new("x", vec![-1]).cites(0));
        assert!(!GroundingSupport::default().cites(0));
    }

    #[test]
    fn test_empty_metadata_accessors() {
        let metadata = GroundingMetadata::default();
        assert!(metadata.chunks().is_empty());
        assert!(metadata.supports().is_empty());
    }
}
