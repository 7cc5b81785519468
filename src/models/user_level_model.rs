use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_level() -> u32 {
    1
}

/// Per-user, per-branch progress. Unique compound index on
/// `(user_id, branch_id)`; created lazily the first time a user touches a
/// branch. All counter updates go through `ProgressionService`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserLevel {
    #[serde(default)]
    pub _id: Option<ObjectId>,

    pub user_id: ObjectId,

    pub branch_id: ObjectId,

    #[serde(default = "default_level")]
    pub current_level: u32,

    #[serde(default)]
    pub completed_levels: Vec<u32>,

    #[serde(default)]
    pub questions_answered_in_level: u32,

    #[serde(default)]
    pub correct_in_level: u32,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl UserLevel {
    pub fn new(user_id: ObjectId, branch_id: ObjectId) -> Self {
        Self {
            _id: Some(ObjectId::new()),
            user_id,
            branch_id,
            current_level: 1,
            completed_levels: Vec::new(),
            questions_answered_in_level: 0,
            correct_in_level: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn branch_completed(&self, level_count: u32) -> bool {
        (1..=level_count).all(|lvl| self.completed_levels.contains(&lvl))
    }
}
