//! Grounding metadata model and source extraction
//!
//! Mirrors the wire shape the Gemini API attaches to grounded candidates:
//! an indexed list of web "chunks" and a list of "supports" tying answer
//! segments back to chunk indices. The upstream omits empty arrays, so
//! every field defaults.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::Source;

/// Grounding metadata attached to a model candidate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroundingMetadata {
    pub grounding_chunks: Vec<GroundingChunk>,
    pub grounding_supports: Vec<GroundingSupport>,
}

/// One retrieved web document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// A supported span of the answer text and the chunks backing it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroundingSupport {
    pub segment: Option<Segment>,
    pub grounding_chunk_indices: Vec<usize>,
    /// Reported per-index confidence; carried on the wire but unused here.
    pub confidence_scores: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Segment {
    pub start_index: Option<u32>,
    pub end_index: Option<u32>,
    pub text: String,
}

/// Walk grounding metadata into a deduplicated, ordered source list.
///
/// Sources are unique by URL in first-seen chunk order, with the
/// first-seen title. The snippet is the space-joined text of every
/// support referencing any chunk index that carries the URL. Absent
/// metadata (tool not invoked, grounding unavailable) yields an empty
/// list, not an error.
pub fn extract_sources(metadata: Option<&GroundingMetadata>) -> Vec<Source> {
    let Some(metadata) = metadata else {
        return Vec::new();
    };

    // Group chunk indices by URL, keeping first-seen order and title.
    let mut order: Vec<&str> = Vec::new();
    let mut by_url: HashMap<&str, (&str, Vec<usize>)> = HashMap::new();
    for (index, chunk) in metadata.grounding_chunks.iter().enumerate() {
        let Some(web) = &chunk.web else { continue };
        let (Some(uri), Some(title)) = (web.uri.as_deref(), web.title.as_deref()) else {
            continue;
        };
        by_url
            .entry(uri)
            .or_insert_with(|| {
                order.push(uri);
                (title, Vec::new())
            })
            .1
            .push(index);
    }

    order
        .into_iter()
        .map(|url| {
            let (title, indices) = &by_url[url];
            let snippet = metadata
                .grounding_supports
                .iter()
                .filter(|support| {
                    support
                        .grounding_chunk_indices
                        .iter()
                        .any(|i| indices.contains(i))
                })
                .filter_map(|support| support.segment.as_ref())
                .map(|segment| segment.text.as_str())
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" ");

            Source {
                title: (*title).to_string(),
                url: url.to_string(),
                snippet,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(uri: &str, title: &str) -> GroundingChunk {
        GroundingChunk {
            web: Some(WebSource {
                uri: Some(uri.to_string()),
                title: Some(title.to_string()),
            }),
        }
    }

    fn support(text: &str, indices: &[usize]) -> GroundingSupport {
        GroundingSupport {
            segment: Some(Segment {
                start_index: None,
                end_index: None,
                text: text.to_string(),
            }),
            grounding_chunk_indices: indices.to_vec(),
            confidence_scores: vec![0.9; indices.len()],
        }
    }

    #[test]
    fn missing_metadata_yields_empty_list() {
        assert!(extract_sources(None).is_empty());
    }

    #[test]
    fn empty_metadata_yields_empty_list() {
        let metadata = GroundingMetadata::default();
        assert!(extract_sources(Some(&metadata)).is_empty());
    }

    #[test]
    fn chunks_without_web_info_are_skipped() {
        let metadata = GroundingMetadata {
            grounding_chunks: vec![
                GroundingChunk { web: None },
                GroundingChunk {
                    web: Some(WebSource {
                        uri: Some("https://a.example".to_string()),
                        title: None,
                    }),
                },
                chunk("https://b.example", "B"),
            ],
            grounding_supports: vec![],
        };

        let sources = extract_sources(Some(&metadata));
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, "https://b.example");
        assert_eq!(sources[0].snippet, "");
    }

    #[test]
    fn snippet_joins_supports_for_the_chunk() {
        let metadata = GroundingMetadata {
            grounding_chunks: vec![chunk("https://a.example", "A"), chunk("https://b.example", "B")],
            grounding_supports: vec![
                support("first span", &[0]),
                support("other source", &[1]),
                support("second span", &[0, 1]),
            ],
        };

        let sources = extract_sources(Some(&metadata));
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].snippet, "first span second span");
        assert_eq!(sources[1].snippet, "other source second span");
    }

    #[test]
    fn duplicate_urls_collapse_to_first_seen_title() {
        let metadata = GroundingMetadata {
            grounding_chunks: vec![
                chunk("https://a.example", "First Title"),
                chunk("https://a.example", "Second Title"),
            ],
            grounding_supports: vec![support("via chunk zero", &[0]), support("via chunk one", &[1])],
        };

        let sources = extract_sources(Some(&metadata));
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].title, "First Title");
        // Supports referencing either duplicate index contribute.
        assert_eq!(sources[0].snippet, "via chunk zero via chunk one");
    }

    #[test]
    fn order_follows_first_seen_chunk_order() {
        let metadata = GroundingMetadata {
            grounding_chunks: vec![
                chunk("https://b.example", "B"),
                chunk("https://a.example", "A"),
                chunk("https://b.example", "B again"),
            ],
            grounding_supports: vec![],
        };

        let urls: Vec<_> = extract_sources(Some(&metadata))
            .into_iter()
            .map(|s| s.url)
            .collect();
        assert_eq!(urls, vec!["https://b.example", "https://a.example"]);
    }

    #[test]
    fn empty_segment_texts_are_dropped() {
        let metadata = GroundingMetadata {
            grounding_chunks: vec![chunk("https://a.example", "A")],
            grounding_supports: vec![support("", &[0]), support("kept", &[0])],
        };

        let sources = extract_sources(Some(&metadata));
        assert_eq!(sources[0].snippet, "kept");
    }

    #[test]
    fn wire_shape_deserializes() {
        let raw = r#"{
            "groundingChunks": [
                {"web": {"uri": "https://a.example", "title": "A"}}
            ],
            "groundingSupports": [
                {
                    "segment": {"startIndex": 0, "endIndex": 10, "text": "span"},
                    "groundingChunkIndices": [0],
                    "confidenceScores": [0.97]
                }
            ],
            "webSearchQueries": ["ignored extra field"]
        }"#;

        let metadata: GroundingMetadata = serde_json::from_str(raw).unwrap();
        let sources = extract_sources(Some(&metadata));
        assert_eq!(sources[0].title, "A");
        assert_eq!(sources[0].snippet, "span");
    }
}
