//! API Handlers
//!
//! HTTP request handlers for each chat server endpoint.

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::chat::{ChatClient, ChatMessage, PromptSet, SessionStore};
use crate::config::AppConfig;
use crate::docs::{Manifest, MarkdownCache, MANIFEST_FILE};
use crate::error::{AppError, Result};
use crate::models::{
    FilesResponse, HealthResponse, MappingStatus, PathsResponse, QueryRequest, QueryResponse,
    SessionResponse, SummariesResponse,
};
use crate::paths::PathResolver;

/// Application state shared across all handlers.
///
/// The document cache and session store are process-wide singletons behind
/// `Arc<RwLock<...>>`; handlers take the write lock for cache
/// read-modify-write sequences and release it before calling the chat API.
#[derive(Clone)]
pub struct AppState {
    /// Shared markdown document cache
    pub cache: Arc<RwLock<MarkdownCache>>,
    /// Shared per-session chat history
    pub sessions: Arc<RwLock<SessionStore>>,
    /// Path resolution for config and data directories
    pub resolver: PathResolver,
}

impl AppState {
    /// Creates application state rooted at the resolver's project root.
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            cache: Arc::new(RwLock::new(MarkdownCache::new(resolver.clone()))),
            sessions: Arc::new(RwLock::new(SessionStore::new())),
            resolver,
        }
    }
}

/// Handler for GET /
pub async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": "Talking P&IDs API" }))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handler for GET /api/files
///
/// Returns manifest mappings enriched with on-disk existence flags, plus the
/// raw directory listings. Missing directories yield empty listings.
pub async fn files_handler(State(state): State<AppState>) -> Result<Json<FilesResponse>> {
    let config = AppConfig::load(&state.resolver);
    let manifest = Manifest::load(&state.resolver.config_file(MANIFEST_FILE)).await;

    let pdfs = list_files_with_ext(
        &state.resolver.resolve_relative(&config.directories.pdfs),
        ".pdf",
    )
    .await;
    let jsons = list_files_with_ext(
        &state.resolver.resolve_relative(&config.directories.jsons),
        ".json",
    )
    .await;
    let mds = list_files_with_ext(
        &state.resolver.resolve_relative(&config.directories.mds),
        ".md",
    )
    .await;

    let mappings = manifest
        .mappings
        .into_iter()
        .map(|mapping| MappingStatus {
            pdf_exists: file_listed(&pdfs, mapping.pdf.as_deref()),
            json_exists: file_listed(&jsons, mapping.json.as_deref()),
            md_exists: file_listed(&mds, mapping.md.as_deref()),
            mapping,
        })
        .collect();

    Ok(Json(FilesResponse {
        mappings,
        available_pdfs: pdfs,
        available_jsons: jsons,
        available_mds: mds,
    }))
}

/// Handler for GET /api/summaries
///
/// Returns lightweight document summaries, generating and persisting
/// missing ones as a side effect.
pub async fn summaries_handler(State(state): State<AppState>) -> Json<SummariesResponse> {
    let summaries = state.cache.write().await.get_summaries().await;
    Json(SummariesResponse { summaries })
}

/// Handler for POST /api/session
///
/// Loads all markdown documentation, sends it to the chat API with the
/// session-initialization prompt, and returns the assistant's
/// acknowledgement together with a fresh session id.
pub async fn session_handler(State(state): State<AppState>) -> Result<Json<SessionResponse>> {
    let config = AppConfig::load(&state.resolver);
    let prompts = PromptSet::load(&state.resolver);
    info!(model = %config.openai.model, "initializing chat session");

    let docs = {
        let mut cache = state.cache.write().await;
        cache.refresh_all().await;
        cache.documents()
    };
    if docs.is_empty() {
        return Err(AppError::NotFound(
            "No markdown files found. Please add markdown files to the data/mds folder."
                .to_string(),
        ));
    }

    let client = ChatClient::from_config(&config)?;
    let init_message = format!(
        "{}\n\n{}",
        corpus_context(&docs),
        prompts.session_init_prompt(docs.len())
    );
    let session_id = chrono::Utc::now().timestamp_millis().to_string();

    let messages = vec![
        ChatMessage::system(prompts.system_prompt()),
        ChatMessage::user(init_message.clone()),
    ];
    let answer = client.complete(&messages).await?;

    state
        .sessions
        .write()
        .await
        .append(&session_id, &init_message, &answer);

    info!(session_id = %session_id, markdowns = docs.len(), "session initialized");
    Ok(Json(SessionResponse {
        success: true,
        message: answer,
        markdowns_loaded: docs.len(),
        session_id,
    }))
}

/// Handler for POST /api/query
///
/// Builds document context (the selected diagram's markdown, or the whole
/// corpus), sends the question with session history to the chat API, and
/// records the exchange.
pub async fn query_handler(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let config = AppConfig::load(&state.resolver);
    let prompts = PromptSet::load(&state.resolver);

    let selected = req
        .selected_mapping
        .as_ref()
        .and_then(|mapping| mapping.md.as_deref().filter(|md| !md.is_empty()));

    let context = match (req.selected_mapping.as_ref(), selected) {
        (Some(mapping), Some(md)) => {
            let markdown = {
                let mut cache = state.cache.write().await;
                cache.get_by_filename(md).await
            };
            match markdown {
                Some(content) => format!(
                    "P&ID Markdown Documentation for {} ({}):\n\n{}\n\n",
                    mapping.id.as_deref().unwrap_or("unknown"),
                    mapping.pdf.as_deref().unwrap_or("unknown"),
                    content
                ),
                None => {
                    // The user selected a mapping whose markdown is gone;
                    // tell the model rather than failing the request.
                    warn!(file = %md, "selected markdown not found");
                    format!("No markdown found for {md}.\n\n")
                }
            }
        }
        _ => {
            let docs = {
                let mut cache = state.cache.write().await;
                cache.refresh_all().await;
                cache.documents()
            };
            corpus_context(&docs)
        }
    };

    let full_query = format!("{}Question: {}", context, req.query);
    let session_id = req.session_id.clone().unwrap_or_else(|| "default".to_string());

    let client = ChatClient::from_config(&config)?;
    let messages = {
        state
            .sessions
            .read()
            .await
            .messages_with_history(&prompts.system_prompt(), &session_id, &full_query)
    };
    let answer = client.complete(&messages).await?;

    state
        .sessions
        .write()
        .await
        .append(&session_id, &full_query, &answer);

    Ok(Json(QueryResponse { answer }))
}

/// Handler for GET /api/pdf/:filename
///
/// Serves a diagram PDF inline with a one-hour cache header.
pub async fn pdf_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    if !filename.ends_with(".pdf") {
        return Err(AppError::InvalidRequest("Invalid file type".to_string()));
    }
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(AppError::InvalidRequest("Invalid file name".to_string()));
    }

    let config = AppConfig::load(&state.resolver);
    let path = state
        .resolver
        .resolve_relative(&config.directories.pdfs)
        .join(&filename);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(file = %filename, path = %path.display(), %err, "pdf not found");
            return Err(AppError::NotFound(format!("File not found: {filename}")));
        }
    };

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{filename}\""),
        ),
        (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
    ];
    Ok((headers, bytes).into_response())
}

/// Handler for GET /debug/paths
///
/// Diagnostics for path resolution across deployment environments.
pub async fn paths_handler(State(state): State<AppState>) -> Json<PathsResponse> {
    let config = AppConfig::load(&state.resolver);
    let markdown_dir = state.resolver.resolve_relative(&config.directories.mds);
    let pdf_dir = state.resolver.resolve_relative(&config.directories.pdfs);

    Json(PathsResponse {
        project_root: state.resolver.project_root().display().to_string(),
        config_exists: state.resolver.config_file("config.json").exists(),
        markdown_dir_exists: markdown_dir.exists(),
        markdown_files: list_files_with_ext(&markdown_dir, ".md").await,
        markdown_dir: markdown_dir.display().to_string(),
        pdf_dir_exists: pdf_dir.exists(),
        pdf_files: list_files_with_ext(&pdf_dir, ".pdf").await,
        pdf_dir: pdf_dir.display().to_string(),
    })
}

// == Context Assembly ==

/// Formats the full documentation corpus as prompt context.
fn corpus_context(docs: &[(String, String)]) -> String {
    if docs.is_empty() {
        return "No P&ID markdown documentation available yet.\n\n".to_string();
    }

    let mut context = format!("P&ID Documentation ({} systems available):\n\n", docs.len());
    for (idx, (filename, content)) in docs.iter().enumerate() {
        context.push_str(&format!(
            "=== P&ID Documentation File {}: {} ===\n\n{}\n\n",
            idx + 1,
            filename,
            content
        ));
    }
    context
}

// == Filesystem Helpers ==

/// Lists filenames with the given extension, sorted; a missing or unreadable
/// directory yields an empty listing.
async fn list_files_with_ext(dir: &FsPath, ext: &str) -> Vec<String> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut filenames = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(ext) {
            filenames.push(name);
        }
    }
    filenames.sort();
    filenames
}

fn file_listed(listing: &[String], filename: Option<&str>) -> bool {
    match filename {
        Some(filename) => listing.iter().any(|name| name == filename),
        None => false,
    }
}
