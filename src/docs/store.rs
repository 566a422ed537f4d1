//! Document Store Module
//!
//! Main cache engine for markdown documentation: keeps file contents in
//! memory keyed by filename, detects staleness via modification timestamps,
//! and synchronizes derived summaries with the file-mappings manifest.
//!
//! One instance is shared process-wide behind `Arc<RwLock<...>>`; every
//! read-modify-write sequence runs under the write lock, which also
//! serializes manifest writes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::docs::{
    CacheStats, DocSummary, FileMapping, Manifest, MarkdownDocument, StoredSummary, MANIFEST_FILE,
    MARKDOWN_EXT,
};
use crate::paths::PathResolver;

// == Markdown Cache ==
/// In-memory store of markdown documents and their derived summaries.
#[derive(Debug)]
pub struct MarkdownCache {
    /// Path resolution for the documents directory and manifest
    resolver: PathResolver,
    /// Cached documents keyed by filename
    docs: HashMap<String, MarkdownDocument>,
    /// Memoized summaries; `None` means invalidated
    summaries: Option<Vec<DocSummary>>,
    /// Documents directory the cache currently reflects
    docs_dir: Option<PathBuf>,
    /// Instant of the last completed full refresh
    last_refreshed: Option<SystemTime>,
    /// Activity counters
    stats: CacheStats,
}

impl MarkdownCache {
    // == Constructor ==
    /// Creates an empty cache using the given path resolver.
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            resolver,
            docs: HashMap::new(),
            summaries: None,
            docs_dir: None,
            last_refreshed: None,
            stats: CacheStats::new(),
        }
    }

    // == Directory Resolution ==
    /// Resolves the current documents directory from config/environment.
    ///
    /// When the resolved directory differs from the one the cache reflects,
    /// all cached content and summaries are dropped: a new directory is a
    /// new universe of documents.
    fn resolve_docs_dir(&mut self) -> PathBuf {
        let config = AppConfig::load(&self.resolver);
        let dir = self.resolver.resolve_relative(&config.directories.mds);

        if self.docs_dir.as_deref() != Some(dir.as_path()) {
            if self.docs_dir.is_some() {
                info!(dir = %dir.display(), "markdown directory changed, dropping cache");
            }
            self.docs.clear();
            self.summaries = None;
            self.docs_dir = Some(dir.clone());
        }

        dir
    }

    // == Refresh All ==
    /// Returns the content of every markdown file in the documents
    /// directory, refreshing cache entries whose on-disk timestamp changed.
    ///
    /// A missing directory yields an empty result. A file that fails to
    /// read is logged and omitted; the pass continues. Completing a pass
    /// invalidates the memoized summaries.
    pub async fn refresh_all(&mut self) -> Vec<String> {
        let dir = self.resolve_docs_dir();

        if !dir.exists() {
            warn!(dir = %dir.display(), "markdown directory does not exist");
            return Vec::new();
        }

        let filenames = match list_markdown_files(&dir).await {
            Ok(filenames) => filenames,
            Err(err) => {
                warn!(dir = %dir.display(), %err, "failed to list markdown directory");
                return Vec::new();
            }
        };
        if filenames.is_empty() {
            warn!(dir = %dir.display(), "no markdown files found");
        }

        let mut contents = Vec::with_capacity(filenames.len());
        for filename in filenames {
            let path = dir.join(&filename);

            let cached_mtime = self.docs.get(&filename).map(|doc| doc.mtime);
            if let Some(cached_mtime) = cached_mtime {
                match file_mtime(&path).await {
                    Ok(mtime) if mtime == cached_mtime => {
                        if let Some(doc) = self.docs.get(&filename) {
                            contents.push(doc.content.clone());
                            self.stats.record_hit();
                            continue;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => {
                        // Stat failed on a cached entry: the file was likely
                        // deleted out from under us. Evict, then let the
                        // fresh read below decide.
                        self.docs.remove(&filename);
                        self.stats.record_eviction();
                    }
                }
            }

            if let Some(content) = self.read_document(&path, &filename).await {
                contents.push(content);
            }
        }

        // Contents may have changed, so memoized summaries are no longer
        // trustworthy.
        self.summaries = None;
        self.last_refreshed = Some(SystemTime::now());
        self.stats.record_refresh();

        contents
    }

    // == Get By Filename ==
    /// Returns the content of one markdown file, from cache when the on-disk
    /// timestamp matches, otherwise freshly read.
    ///
    /// Returns `None` when the file cannot be read; a missing document is an
    /// expected outcome for callers, never a hard fault.
    pub async fn get_by_filename(&mut self, filename: &str) -> Option<String> {
        let dir = self.resolve_docs_dir();
        let path = dir.join(filename);

        let cached_mtime = self.docs.get(filename).map(|doc| doc.mtime);
        if let Some(cached_mtime) = cached_mtime {
            match file_mtime(&path).await {
                Ok(mtime) if mtime == cached_mtime => {
                    if let Some(doc) = self.docs.get(filename) {
                        self.stats.record_hit();
                        return Some(doc.content.clone());
                    }
                }
                Ok(_) => {}
                Err(_) => {
                    self.docs.remove(filename);
                    self.stats.record_eviction();
                }
            }
        }

        self.read_document(&path, filename).await
    }

    // == Get Summaries ==
    /// Returns a summary for every document, generating and persisting
    /// missing ones.
    ///
    /// Memoized summaries are returned without any I/O. Otherwise the
    /// manifest is loaded (missing/corrupt degrades to empty), the content
    /// cache fully refreshed, and then per document: a manifest summary
    /// whose size matches the current content length is reused verbatim;
    /// anything else is derived fresh and written back into the manifest,
    /// synthesizing a minimal entry when none references the document. The
    /// manifest is persisted once at the end of the pass, only when entries
    /// were created or updated; a write failure is logged and non-fatal.
    pub async fn get_summaries(&mut self) -> Vec<DocSummary> {
        if let Some(cached) = &self.summaries {
            return cached.clone();
        }

        let manifest_path = self.resolver.config_file(MANIFEST_FILE);
        let mut manifest = Manifest::load(&manifest_path).await;

        self.refresh_all().await;

        let mut filenames: Vec<String> = self.docs.keys().cloned().collect();
        filenames.sort();

        let mut summaries = Vec::with_capacity(filenames.len());
        let mut dirty = false;

        for filename in &filenames {
            let doc = match self.docs.get(filename) {
                Some(doc) => doc,
                None => continue,
            };
            let char_len = doc.char_len();

            match manifest
                .mappings
                .iter_mut()
                .find(|mapping| mapping.matches_md(filename))
            {
                Some(mapping) if mapping.has_valid_summary(char_len) => {
                    if let Some(stored) = &mapping.summary {
                        summaries.push(DocSummary::new(filename, &stored.preview, stored.size));
                    }
                }
                Some(mapping) => {
                    let summary = DocSummary::derive(filename, &doc.content);
                    mapping.summary = Some(StoredSummary {
                        preview: summary.preview.clone(),
                        size: summary.size,
                    });
                    dirty = true;
                    summaries.push(summary);
                }
                None => {
                    warn!(file = %filename, "no manifest entry found, creating minimal mapping");
                    let summary = DocSummary::derive(filename, &doc.content);
                    manifest
                        .mappings
                        .push(FileMapping::synthesized(filename, &summary));
                    dirty = true;
                    summaries.push(summary);
                }
            }
        }

        if dirty {
            match manifest.save(&manifest_path).await {
                Ok(()) => {
                    info!(path = %manifest_path.display(), "manifest updated with markdown summaries")
                }
                Err(err) => {
                    // In-memory summaries stay correct; only the cache-warm
                    // across restarts is lost.
                    error!(path = %manifest_path.display(), %err, "failed to persist manifest")
                }
            }
        }

        self.summaries = Some(summaries.clone());
        summaries
    }

    // == Accessors ==
    /// Returns `(filename, content)` pairs of all cached documents, sorted
    /// by filename. Used by the query layer when building prompt context.
    pub fn documents(&self) -> Vec<(String, String)> {
        let mut docs: Vec<(String, String)> = self
            .docs
            .values()
            .map(|doc| (doc.filename.clone(), doc.content.clone()))
            .collect();
        docs.sort_by(|a, b| a.0.cmp(&b.0));
        docs
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns true if no documents are cached.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Returns current activity counters.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Instant of the last completed full refresh, if any.
    pub fn last_refreshed(&self) -> Option<SystemTime> {
        self.last_refreshed
    }

    // == Internal ==
    /// Reads a file fresh from disk and caches it. Read failures are logged
    /// and reported as `None`.
    async fn read_document(&mut self, path: &Path, filename: &str) -> Option<String> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) => {
                error!(file = %filename, %err, "error loading markdown file");
                return None;
            }
        };
        let mtime = match file_mtime(path).await {
            Ok(mtime) => mtime,
            Err(err) => {
                error!(file = %filename, %err, "error reading markdown file metadata");
                return None;
            }
        };

        self.stats.record_disk_read();
        self.docs.insert(
            filename.to_string(),
            MarkdownDocument::new(filename, content.clone(), mtime),
        );
        Some(content)
    }
}

// == Filesystem Helpers ==

async fn file_mtime(path: &Path) -> std::io::Result<SystemTime> {
    tokio::fs::metadata(path).await.and_then(|m| m.modified())
}

/// Lists markdown filenames in `dir`, sorted for deterministic ordering
/// within a refresh pass.
async fn list_markdown_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut filenames = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(MARKDOWN_EXT) {
            filenames.push(name);
        }
    }
    filenames.sort();
    Ok(filenames)
}
