//! Request and Response models for the chat server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{QueryRequest, SelectedMapping};
pub use responses::{
    ErrorResponse, FilesResponse, HealthResponse, MappingStatus, PathsResponse, QueryResponse,
    SessionResponse, SummariesResponse,
};
