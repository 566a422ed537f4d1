//! Request DTOs for the chat server API
//!
//! Defines the structure of incoming HTTP request bodies. Field names are
//! camelCase on the wire, matching the frontend.

use serde::Deserialize;

/// Request body for the query operation (POST /api/query)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// The user's question
    pub query: String,
    /// Whether a chat session was initialized by the client
    #[serde(default)]
    pub session_started: bool,
    /// Specific diagram the user selected, if any
    #[serde(default)]
    pub selected_mapping: Option<SelectedMapping>,
    /// Session identifier for history tracking
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Diagram selection carried by a query, mirroring manifest fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedMapping {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub pdf: Option<String>,
    #[serde(default)]
    pub md: Option<String>,
}

impl QueryRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.query.trim().is_empty() {
            return Some("Query cannot be empty".to_string());
        }
        None
    }
}
