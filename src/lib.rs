//! P&ID Chat - backend for chatting with an LLM about P&ID documentation
//!
//! Serves markdown-rendered P&ID documentation to a chat-completion API,
//! with an mtime-aware document cache and manifest-backed summaries.

pub mod api;
pub mod chat;
pub mod config;
pub mod docs;
pub mod error;
pub mod models;
pub mod paths;

pub use api::AppState;
pub use config::AppConfig;
pub use docs::MarkdownCache;
pub use paths::PathResolver;
