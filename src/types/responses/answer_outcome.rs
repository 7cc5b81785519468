use crate::models::achievement_model::Achievement;
use serde::Serialize;

/// Result of submitting an answer, including any progression side effects.
#[derive(Debug, Serialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub correct_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub level_completed: bool,
    pub current_level: u32,
    pub unlocked: Vec<Achievement>,
}
