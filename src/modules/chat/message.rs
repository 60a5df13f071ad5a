// src/modules/chat/message.rs

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::util::api::Source;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Assistant",
        }
    }
}

/// One entry of the chat transcript. Never modified after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub sources: Option<Vec<Source>>,
    pub created_at: DateTime<Local>,
}

impl ChatMessage {
    pub fn new_user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into(), None)
    }

    pub fn new_assistant(text: impl Into<String>, sources: Vec<Source>) -> Self {
        let sources = if sources.is_empty() { None } else { Some(sources) };
        Self::new(Role::Assistant, text.into(), sources)
    }

    fn new(role: Role, text: String, sources: Option<Vec<Source>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text,
            sources,
            created_at: Local::now(),
        }
    }

    pub fn sources(&self) -> &[Source] {
        self.sources.as_deref().unwrap_or_default()
    }
}
