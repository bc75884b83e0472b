//! Combines formatter and extractor output into the client response.

use groundsearch_types::protocol::GroundingMetadata;
use groundsearch_types::FormattedResponse;

use super::markdown::format_response;
use super::sources::extract_from_metadata;

/// Format `text` and extract sources from `metadata`.
pub fn assemble_response(text: &str, metadata: Option<&GroundingMetadata>) -> FormattedResponse {
    FormattedResponse { summary: format_response(text), sources: extract_from_metadata(metadata) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundsearch_types::protocol::{GroundingChunk, GroundingSupport};

    #[test]
    fn test_assemble_with_metadata() {
        let metadata = GroundingMetadata {
            grounding_chunks: Some(vec![GroundingChunk::web("https://rust-lang.org", "Rust")]),
            grounding_supports: Some(vec![GroundingSupport::new("Rust is fast", vec![0])]),
            ..Default::default()
        };

        let response = assemble_response("Rust is fast.", Some(&metadata));
        assert_eq!(response.summary, "<p>Rust is fast.</p>\n");
        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.sources[0].snippet, "Rust is fast");
    }

    #[test]
    fn test_assemble_without_metadata() {
        let response = assemble_response("Plain answer", None);
        assert!(response.summary.contains("Plain answer"));
        assert!(response.sources.is_empty());
    }
}
