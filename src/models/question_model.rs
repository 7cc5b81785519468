use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Question {
    #[serde(default)]
    pub _id: Option<ObjectId>,

    pub branch_id: ObjectId,

    /// 1-based level within the branch.
    pub level: u32,

    pub text: String,

    pub options: Vec<String>,

    pub correct_index: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}
