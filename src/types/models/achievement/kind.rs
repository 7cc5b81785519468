use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// What a badge counts. `requirement` on the definition is compared against
/// the matching `UserAchievement.progress` counter.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AchievementKind {
    CorrectAnswers,
    LevelsCompleted,
    BranchCompleted,
}
