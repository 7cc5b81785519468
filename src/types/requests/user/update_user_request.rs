use crate::types::models::user::user_status::UserStatus;
use serde::{Deserialize, Serialize};

/// Partial update; only present fields are `$set`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}
