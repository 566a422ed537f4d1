//! Prompt Set Module
//!
//! Loads the prompt set from `config/prompts.json`, falling back to built-in
//! defaults when the file or individual entries are missing.

use serde::Deserialize;
use tracing::warn;

use crate::paths::PathResolver;

/// System prompt used when none is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert assistant for Piping & Instrumentation Diagrams (P&IDs). Answer questions based on the provided markdown documentation and your knowledge of P&IDs.";

/// Session-initialization prompt used when none is configured.
pub const DEFAULT_SESSION_INIT_PROMPT: &str = "I'm starting a new session to discuss plant operations. Please acknowledge that you've received the plant data.";

// == Prompt Set ==
/// Prompt templates loaded from `prompts.json`. Every entry is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromptSet {
    system_prompt: Option<PromptEntry>,
    default_system_prompt: Option<PromptEntry>,
    session_init_prompt: Option<PromptEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct PromptEntry {
    #[serde(default)]
    content: String,
}

impl PromptSet {
    /// Loads the prompt set; a missing or unparsable file degrades to the
    /// built-in defaults.
    pub fn load(resolver: &PathResolver) -> Self {
        let path = resolver.config_file("prompts.json");
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str(&raw) {
            Ok(prompts) => prompts,
            Err(err) => {
                warn!(path = %path.display(), %err, "unparsable prompts file, using defaults");
                Self::default()
            }
        }
    }

    /// Returns the system prompt: configured, else the configured default,
    /// else the built-in.
    pub fn system_prompt(&self) -> String {
        self.system_prompt
            .as_ref()
            .or(self.default_system_prompt.as_ref())
            .map(|entry| entry.content.clone())
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string())
    }

    /// Returns the session-initialization prompt with the `{count}`
    /// placeholder replaced by the number of loaded documents.
    pub fn session_init_prompt(&self, count: usize) -> String {
        self.session_init_prompt
            .as_ref()
            .map(|entry| entry.content.clone())
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_INIT_PROMPT.to_string())
            .replace("{count}", &count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let prompts = PromptSet::load(&PathResolver::with_root(tmp.path()));
        assert_eq!(prompts.system_prompt(), DEFAULT_SYSTEM_PROMPT);
        assert_eq!(
            prompts.session_init_prompt(3),
            DEFAULT_SESSION_INIT_PROMPT
        );
    }

    #[test]
    fn test_configured_prompts_win() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("config")).unwrap();
        std::fs::write(
            tmp.path().join("config/prompts.json"),
            r#"{
                "systemPrompt": {"content": "You are a plant operator."},
                "sessionInitPrompt": {"content": "Loaded {count} diagrams."}
            }"#,
        )
        .unwrap();

        let prompts = PromptSet::load(&PathResolver::with_root(tmp.path()));
        assert_eq!(prompts.system_prompt(), "You are a plant operator.");
        assert_eq!(prompts.session_init_prompt(7), "Loaded 7 diagrams.");
    }

    #[test]
    fn test_default_system_prompt_entry_is_fallback() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("config")).unwrap();
        std::fs::write(
            tmp.path().join("config/prompts.json"),
            r#"{"defaultSystemPrompt": {"content": "Fallback prompt."}}"#,
        )
        .unwrap();

        let prompts = PromptSet::load(&PathResolver::with_root(tmp.path()));
        assert_eq!(prompts.system_prompt(), "Fallback prompt.");
    }

    #[test]
    fn test_corrupt_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("config")).unwrap();
        std::fs::write(tmp.path().join("config/prompts.json"), "{oops").unwrap();

        let prompts = PromptSet::load(&PathResolver::with_root(tmp.path()));
        assert_eq!(prompts.system_prompt(), DEFAULT_SYSTEM_PROMPT);
    }
}
