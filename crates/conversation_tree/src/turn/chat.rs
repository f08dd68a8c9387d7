use serde::{Deserialize, Serialize};

use super::{ContentPart, ConversationTurn};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A materialized chat turn.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatTurn {
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

impl ChatTurn {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            content: Vec::new(),
        }
    }

    /// User turn with a single text part
    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, Role::User).with_part(ContentPart::text(text))
    }

    /// Assistant turn with a single text part
    pub fn assistant(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, Role::Assistant).with_part(ContentPart::text(text))
    }

    pub fn with_part(mut self, part: ContentPart) -> Self {
        self.content.push(part);
        self
    }
}

impl ConversationTurn for ChatTurn {
    type Fragment = ContentPart;

    fn id(&self) -> &str {
        &self.id
    }

    fn fragments(&self) -> &[ContentPart] {
        &self.content
    }
}
