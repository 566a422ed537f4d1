//! Summary Module
//!
//! Lightweight document descriptors used to keep LLM prompt context small.

use serde::Serialize;

use crate::docs::PREVIEW_LENGTH;

// == Doc Summary ==
/// A short preview + size descriptor derived from a document's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocSummary {
    /// Filename of the summarized document
    pub filename: String,
    /// Truncated, whitespace-normalized content preview
    pub preview: String,
    /// Content length in characters
    pub size: usize,
}

impl DocSummary {
    /// Creates a summary from already-known fields (e.g. a manifest entry).
    pub fn new(filename: impl Into<String>, preview: impl Into<String>, size: usize) -> Self {
        Self {
            filename: filename.into(),
            preview: preview.into(),
            size,
        }
    }

    /// Derives a summary from document content.
    ///
    /// The preview is the first [`PREVIEW_LENGTH`] characters with newlines
    /// replaced by spaces and surrounding whitespace trimmed. The size is
    /// the character count of the full content.
    pub fn derive(filename: &str, content: &str) -> Self {
        let preview = content
            .chars()
            .take(PREVIEW_LENGTH)
            .collect::<String>()
            .replace('\n', " ")
            .trim()
            .to_string();

        Self {
            filename: filename.to_string(),
            preview,
            size: content.chars().count(),
        }
    }
}
