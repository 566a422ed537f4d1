//! Documents Module
//!
//! In-memory cache of markdown P&ID documentation with mtime-based
//! invalidation, derived summaries, and manifest synchronization.

mod document;
mod manifest;
mod stats;
mod store;
mod summary;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use document::MarkdownDocument;
pub use manifest::{FileMapping, Manifest, StoredSummary};
pub use stats::CacheStats;
pub use store::MarkdownCache;
pub use summary::DocSummary;

// == Public Constants ==
/// File extension of documents managed by the cache
pub const MARKDOWN_EXT: &str = ".md";

/// Maximum number of characters in a summary preview
pub const PREVIEW_LENGTH: usize = 500;

/// Manifest filename inside the config directory
pub const MANIFEST_FILE: &str = "file-mappings.json";
