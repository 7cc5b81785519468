use crate::types::models::chat::message_role::MessageRole;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,

    pub content: String,

    #[serde(default = "Utc::now")]
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

/// One chat document per user; the assistant context is a trailing slice of
/// `messages`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Chat {
    #[serde(default)]
    pub _id: Option<ObjectId>,

    pub user_id: ObjectId,

    #[serde(default)]
    pub messages: Vec<ChatMessage>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    pub fn new(user_id: ObjectId) -> Self {
        let now = Utc::now();
        Self {
            _id: Some(ObjectId::new()),
            user_id,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
