//! Session History Module
//!
//! Per-session chat history, kept in memory for the process lifetime and
//! shared behind `Arc<RwLock<...>>` by the request handlers.

use std::collections::HashMap;

use crate::chat::ChatMessage;

// == Session Store ==
/// In-memory message history keyed by session id.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Vec<ChatMessage>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the message sequence for a completion call: system prompt,
    /// then the session's history, then the current user input.
    pub fn messages_with_history(
        &self,
        system_prompt: &str,
        session_id: &str,
        user_input: &str,
    ) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(system_prompt)];
        if let Some(history) = self.sessions.get(session_id) {
            messages.extend(history.iter().cloned());
        }
        messages.push(ChatMessage::user(user_input));
        messages
    }

    /// Records a completed exchange in the session's history.
    pub fn append(&mut self, session_id: &str, user_input: &str, assistant_reply: &str) {
        let history = self.sessions.entry(session_id.to_string()).or_default();
        history.push(ChatMessage::user(user_input));
        history.push(ChatMessage::assistant(assistant_reply));
    }

    /// Drops a session's history.
    pub fn clear(&mut self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    /// Number of stored messages for a session.
    pub fn history_len(&self, session_id: &str) -> usize {
        self.sessions
            .get(session_id)
            .map(|history| history.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;

    #[test]
    fn test_messages_without_history() {
        let store = SessionStore::new();
        let messages = store.messages_with_history("system", "s1", "question");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "question");
    }

    #[test]
    fn test_append_grows_history_in_order() {
        let mut store = SessionStore::new();
        store.append("s1", "first question", "first answer");

        let messages = store.messages_with_history("system", "s1", "second question");
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].content, "first question");
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].content, "first answer");
        assert_eq!(messages[3].content, "second question");
    }

    #[test]
    fn test_sessions_are_isolated() {
        let mut store = SessionStore::new();
        store.append("s1", "q", "a");

        assert_eq!(store.history_len("s1"), 2);
        assert_eq!(store.history_len("s2"), 0);
        let messages = store.messages_with_history("system", "s2", "question");
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_clear_session() {
        let mut store = SessionStore::new();
        store.append("s1", "q", "a");
        store.clear("s1");
        assert_eq!(store.history_len("s1"), 0);
    }
}
