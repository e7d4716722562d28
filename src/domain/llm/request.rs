use serde::{Deserialize, Serialize};

use super::Message;

/// Messages sent in one chat completion call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
}

impl LlmRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// A request consisting of one user-role message
    pub fn single_prompt(prompt: impl Into<String>) -> Self {
        Self::new(vec![Message::user(prompt)])
    }

    /// All message contents joined by newlines
    pub fn prompt_text(&self) -> String {
        self.messages
            .iter()
            .map(Message::content)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
