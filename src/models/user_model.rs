use crate::types::models::user::{
    defaults::{default_role, default_status},
    role::Role,
    user_status::UserStatus,
};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(default)]
    pub _id: Option<ObjectId>,

    pub name: String,

    pub email: String,

    pub password: String,

    #[serde(default = "default_role")]
    pub role: Role,

    #[serde(default = "default_status")]
    pub status: UserStatus,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}
