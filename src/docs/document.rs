//! Document Module
//!
//! Defines the structure for a cached markdown document.

use std::time::SystemTime;

// == Markdown Document ==
/// A markdown file held in the cache, keyed by filename.
#[derive(Debug, Clone)]
pub struct MarkdownDocument {
    /// Filename within the documents directory (unique cache key)
    pub filename: String,
    /// Full markdown content
    pub content: String,
    /// On-disk modification time observed when the content was read
    pub mtime: SystemTime,
}

impl MarkdownDocument {
    /// Creates a new document entry.
    pub fn new(filename: impl Into<String>, content: impl Into<String>, mtime: SystemTime) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            mtime,
        }
    }

    /// Content length in characters, the unit used for summary validation.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
