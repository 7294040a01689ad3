//! Append-only chat transcript
//!
//! The transcript is a strict superset of the navigational state: going
//! back through the decision tree never removes messages, and resetting the
//! walk keeps the history of prior attempts visible. Only constructing a
//! fresh session starts a fresh transcript.

use crate::providers::{ChatMessage, ChatRole};

/// Ordered list of chat messages for one session
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    /// Appends an assistant message
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    /// All messages in order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recent message, if any
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// The last `n` messages in order
    pub fn tail(&self, n: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of assistant messages, used by tests and diagnostics
    pub fn assistant_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == ChatRole::Assistant)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("Olá!");
        transcript.push_user("Oi");
        transcript.push_assistant("O que deseja?");

        let roles: Vec<_> = transcript.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]
        );
    }

    #[test]
    fn test_last() {
        let mut transcript = Transcript::new();
        assert!(transcript.last().is_none());
        transcript.push_user("Oi");
        assert_eq!(transcript.last().unwrap().content, "Oi");
    }

    #[test]
    fn test_tail_shorter_than_len() {
        let mut transcript = Transcript::new();
        for i in 0..5 {
            transcript.push_user(format!("m{}", i));
        }
        let tail = transcript.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].content, "m3");
    }

    #[test]
    fn test_tail_larger_than_len() {
        let mut transcript = Transcript::new();
        transcript.push_user("only");
        assert_eq!(transcript.tail(10).len(), 1);
    }

    #[test]
    fn test_assistant_count() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("a");
        transcript.push_user("u");
        transcript.push_assistant("b");
        assert_eq!(transcript.assistant_count(), 2);
    }
}
