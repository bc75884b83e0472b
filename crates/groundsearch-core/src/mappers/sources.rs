//! Grounding metadata to a de-duplicated, ordered source list.

use std::collections::HashSet;

use groundsearch_types::protocol::{GroundingChunk, GroundingMetadata, GroundingSupport};
use groundsearch_types::SourceEntry;

/// Build the source list for one response.
///
/// A chunk needs both a non-empty uri and title. The first chunk seen for a
/// uri wins; later duplicates are dropped along with their titles. A chunk's
/// snippet is the text of every support citing its position, in support
/// order, joined by single spaces.
pub fn extract_sources(
    chunks: &[GroundingChunk],
    supports: &[GroundingSupport],
) -> Vec<SourceEntry> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(chunks.len());
    let mut sources = Vec::with_capacity(chunks.len());

    for (position, chunk) in chunks.iter().enumerate() {
        let Some(web) = chunk.web.as_ref() else {
            continue;
        };
        let (Some(uri), Some(title)) = (non_empty(web.uri.as_deref()), non_empty(web.title.as_deref()))
        else {
            continue;
        };
        if !seen.insert(uri) {
            continue;
        }

        sources.push(SourceEntry {
            title: title.to_string(),
            url: uri.to_string(),
            snippet: snippet_for(position, supports),
        });
    }

    sources
}

/// Same as [`extract_sources`]; absent metadata yields no sources.
pub fn extract_from_metadata(metadata: Option<&GroundingMetadata>) -> Vec<SourceEntry> {
    match metadata {
        Some(m) => extract_sources(m.chunks(), m.supports()),
        None => Vec::new(),
    }
}

fn snippet_for(position: usize, supports: &[GroundingSupport]) -> String {
    supports
        .iter()
        .filter(|s| s.cites(position))
        .filter_map(GroundingSupport::text)
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
