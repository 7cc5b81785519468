use crate::types::models::achievement::kind::AchievementKind;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Achievement {
    #[serde(default)]
    pub _id: Option<ObjectId>,

    pub name: String,

    pub description: String,

    pub kind: AchievementKind,

    /// Restricts counting to a single branch when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<ObjectId>,

    pub requirement: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserAchievement {
    #[serde(default)]
    pub _id: Option<ObjectId>,

    pub user_id: ObjectId,

    pub achievement_id: ObjectId,

    #[serde(default)]
    pub progress: u32,

    #[serde(default)]
    pub unlocked: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl UserAchievement {
    pub fn new(user_id: ObjectId, achievement_id: ObjectId) -> Self {
        Self {
            _id: Some(ObjectId::new()),
            user_id,
            achievement_id,
            progress: 0,
            unlocked: false,
            unlocked_at: None,
        }
    }
}
