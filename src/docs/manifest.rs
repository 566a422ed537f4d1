//! Manifest Module
//!
//! The file-mappings manifest is an external JSON side-store describing known
//! documents (id, filenames, display metadata) plus cached summaries. The
//! cache reads it, backfills missing summaries, and writes it back; it is
//! never the source of truth for document existence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::docs::DocSummary;

// == Manifest ==
/// Top-level manifest shape: `{"mappings": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub mappings: Vec<FileMapping>,
}

// == File Mapping ==
/// One manifest entry. Unknown fields are round-tripped untouched via
/// `extra`, so a manifest rewrite only ever changes `summary` fields and
/// appended entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMapping {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Referenced PDF filename, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    /// Referenced schema JSON filename, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
    /// Referenced markdown filename, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md: Option<String>,
    /// Cached summary, absent until first generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<StoredSummary>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Summary fields as persisted in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSummary {
    pub preview: String,
    pub size: usize,
}

impl Manifest {
    /// Loads the manifest from `path`.
    ///
    /// A missing or unparsable file degrades to an empty manifest; a parse
    /// failure is logged since it usually means a hand-edit went wrong.
    pub async fn load(path: &Path) -> Self {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str(&raw) {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!(path = %path.display(), %err, "unparsable manifest, treating as empty");
                Self::default()
            }
        }
    }

    /// Persists the manifest to `path` as pretty-printed JSON.
    pub async fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::from)?;
        tokio::fs::write(path, json).await
    }
}

impl FileMapping {
    /// Whether this entry references the given markdown filename.
    pub fn matches_md(&self, filename: &str) -> bool {
        self.md.as_deref() == Some(filename)
    }

    /// Whether the stored summary can be reused for content of the given
    /// character length. A size mismatch means the document changed since
    /// the summary was cached.
    pub fn has_valid_summary(&self, char_len: usize) -> bool {
        self.summary.as_ref().is_some_and(|s| s.size == char_len)
    }

    /// Builds a minimal entry for a document that has no manifest record.
    pub fn synthesized(filename: &str, summary: &DocSummary) -> Self {
        let stem = filename.strip_suffix(".md").unwrap_or(filename);
        Self {
            id: format!("pid-{stem}"),
            name: format!("P&ID {stem}"),
            description: format!("Piping & Instrumentation Diagram {stem}"),
            pdf: None,
            json: None,
            md: Some(filename.to_string()),
            summary: Some(StoredSummary {
                preview: summary.preview.clone(),
                size: summary.size,
            }),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let manifest = Manifest::load(&tmp.path().join("file-mappings.json")).await;
        assert!(manifest.mappings.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file-mappings.json");
        std::fs::write(&path, "{broken").unwrap();

        let manifest = Manifest::load(&path).await;
        assert!(manifest.mappings.is_empty());
    }

    #[tokio::test]
    async fn test_roundtrip_preserves_unknown_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file-mappings.json");
        std::fs::write(
            &path,
            r#"{
                "mappings": [{
                    "id": "pid-unit1",
                    "pdf": "unit1.pdf",
                    "md": "unit1.md",
                    "name": "Unit 1",
                    "description": "Feed section",
                    "revision": 3,
                    "tags": ["feed", "pumps"]
                }]
            }"#,
        )
        .unwrap();

        let manifest = Manifest::load(&path).await;
        manifest.save(&path).await.unwrap();
        let reloaded = Manifest::load(&path).await;

        let mapping = &reloaded.mappings[0];
        assert_eq!(mapping.id, "pid-unit1");
        assert_eq!(mapping.extra["revision"], 3);
        assert_eq!(mapping.extra["tags"][0], "feed");
    }

    #[test]
    fn test_has_valid_summary() {
        let mut mapping = FileMapping::synthesized("unit1.md", &DocSummary::derive("unit1.md", "abc"));
        assert!(mapping.has_valid_summary(3));
        assert!(!mapping.has_valid_summary(4));

        mapping.summary = None;
        assert!(!mapping.has_valid_summary(3));
    }

    #[test]
    fn test_synthesized_entry_fields() {
        let summary = DocSummary::derive("unit2.md", "Short doc");
        let mapping = FileMapping::synthesized("unit2.md", &summary);

        assert_eq!(mapping.id, "pid-unit2");
        assert_eq!(mapping.name, "P&ID unit2");
        assert_eq!(mapping.description, "Piping & Instrumentation Diagram unit2");
        assert_eq!(mapping.md.as_deref(), Some("unit2.md"));
        assert_eq!(
            mapping.summary,
            Some(StoredSummary {
                preview: "Short doc".to_string(),
                size: 9
            })
        );
    }
}
