use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One answer per user per question, enforced by a unique compound index
/// on `(user_id, question_id)`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserAnswer {
    #[serde(default)]
    pub _id: Option<ObjectId>,

    pub user_id: ObjectId,

    pub question_id: ObjectId,

    pub branch_id: ObjectId,

    pub level: u32,

    pub selected_index: u32,

    pub is_correct: bool,

    #[serde(default = "Utc::now")]
    pub answered_at: DateTime<Utc>,
}
