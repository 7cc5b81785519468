use crate::models::achievement_model::Achievement;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A badge definition joined with the caller's progress toward it.
#[derive(Debug, Serialize)]
pub struct AchievementProgress {
    pub achievement: Achievement,
    pub progress: u32,
    pub requirement: u32,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}
