//! API Module
//!
//! HTTP handlers and routing for the chat server REST API.
//!
//! # Endpoints
//! - `GET /` - Service banner
//! - `GET /health` - Health check endpoint
//! - `GET /api/files` - File mappings with existence verification
//! - `GET /api/summaries` - Lightweight document summaries
//! - `POST /api/session` - Initialize a chat session over all documentation
//! - `POST /api/query` - Answer a question with document context
//! - `GET /api/pdf/:filename` - Serve a diagram PDF
//! - `GET /debug/paths` - Path resolution diagnostics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
