//! Chat Module
//!
//! Client for the hosted chat-completion API, prompt-set loading, and the
//! in-memory per-session message history.

mod client;
mod message;
mod prompts;
mod sessions;

// Re-export public types
pub use client::ChatClient;
pub use message::{ChatMessage, Role};
pub use prompts::PromptSet;
pub use sessions::SessionStore;
