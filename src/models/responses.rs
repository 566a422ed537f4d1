//! Response DTOs for the chat server API
//!
//! Defines the structure of outgoing HTTP response bodies. Field names are
//! camelCase on the wire, matching the frontend.

use serde::Serialize;

use crate::docs::FileMapping;

/// Response body for the query operation (POST /api/query)
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    /// The assistant's answer
    pub answer: String,
}

/// Response body for session initialization (POST /api/session)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub success: bool,
    /// The assistant's acknowledgement message
    pub message: String,
    /// Number of markdown documents loaded into the session context
    pub markdowns_loaded: usize,
    pub session_id: String,
}

/// One manifest mapping enriched with on-disk existence flags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingStatus {
    #[serde(flatten)]
    pub mapping: FileMapping,
    pub pdf_exists: bool,
    pub json_exists: bool,
    pub md_exists: bool,
}

/// Response body for the file listing (GET /api/files)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesResponse {
    pub mappings: Vec<MappingStatus>,
    pub available_pdfs: Vec<String>,
    pub available_jsons: Vec<String>,
    pub available_mds: Vec<String>,
}

/// Response body for the summaries listing (GET /api/summaries)
#[derive(Debug, Clone, Serialize)]
pub struct SummariesResponse {
    pub summaries: Vec<crate::docs::DocSummary>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "ok")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the path diagnostics endpoint (GET /debug/paths)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathsResponse {
    pub project_root: String,
    pub config_exists: bool,
    pub markdown_dir: String,
    pub markdown_dir_exists: bool,
    pub markdown_files: Vec<String>,
    pub pdf_dir: String,
    pub pdf_dir_exists: bool,
    pub pdf_files: Vec<String>,
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
