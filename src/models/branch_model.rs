use crate::constants::DEFAULT_LEVEL_COUNT;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_level_count() -> u32 {
    DEFAULT_LEVEL_COUNT
}

fn default_is_active() -> bool {
    true
}

/// A subject track (e.g. Algebra) containing `level_count` levels of
/// multiple-choice questions.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Branch {
    #[serde(default)]
    pub _id: Option<ObjectId>,

    pub name: String,

    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    #[serde(default = "default_level_count")]
    pub level_count: u32,

    #[serde(default = "default_is_active")]
    pub is_active: bool,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}
