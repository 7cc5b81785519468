use crate::{
    models::achievement_model::{Achievement, UserAchievement},
    repositories::{
        achievement_repository::AchievementRepository,
        user_achievement_repository::UserAchievementRepository,
    },
    types::{
        models::achievement::kind::AchievementKind,
        responses::achievement_progress::AchievementProgress,
    },
    utils::locale_utils::{Messages, Namespace},
};
use anyhow::{Context, Result, anyhow};
use bson::oid::ObjectId;
use chrono::Utc;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;

/// One progression tick, as reported by `ProgressionService`.
#[derive(Debug, Clone, Copy)]
pub struct ProgressEvent {
    pub branch_id: ObjectId,
    pub correct_answer: bool,
    pub level_completed: bool,
    pub branch_completed: bool,
}

impl ProgressEvent {
    /// How much this event advances a badge of the given kind, or `None`
    /// when the badge does not apply (wrong kind or wrong branch).
    fn increment_for(&self, achievement: &Achievement) -> Option<u32> {
        if let Some(branch_id) = achievement.branch_id {
            if branch_id != self.branch_id {
                return None;
            }
        }

        let applies = match achievement.kind {
            AchievementKind::CorrectAnswers => self.correct_answer,
            AchievementKind::LevelsCompleted => self.level_completed,
            AchievementKind::BranchCompleted => self.branch_completed,
        };
        applies.then_some(1)
    }
}

pub struct AchievementService {
    achievement_repository: Arc<AchievementRepository>,
    user_achievement_repository: Arc<UserAchievementRepository>,
}

impl AchievementService {
    pub fn new(
        achievement_repository: Arc<AchievementRepository>,
        user_achievement_repository: Arc<UserAchievementRepository>,
    ) -> Self {
        Self {
            achievement_repository,
            user_achievement_repository,
        }
    }

    pub async fn create_achievement(
        &self,
        mut achievement: Achievement,
        messages: &Messages,
    ) -> Result<Achievement> {
        achievement._id = Some(ObjectId::new());
        achievement.created_at = Utc::now();
        achievement.updated_at = achievement.created_at;

        self.achievement_repository
            .create_achievement(&achievement)
            .await
            .map_err(|e| {
                anyhow!(messages.get_str(
                    Namespace::Quiz,
                    "achievement.create_error",
                    "Error creating achievement",
                ))
                .context(format!("Error creating achievement: {}", e))
            })
    }

    pub async fn get_all_achievements(&self, messages: &Messages) -> Result<Vec<Achievement>> {
        self.achievement_repository
            .get_all_achievements()
            .await
            .map_err(|e| {
                anyhow!(messages.get_str(
                    Namespace::Quiz,
                    "achievement.fetch_error",
                    "Error fetching achievements",
                ))
                .context(format!("Error fetching achievements: {}", e))
            })
    }

    /// Every badge definition joined with the caller's progress; definitions
    /// the caller never touched come back with zero progress.
    pub async fn get_user_progress(
        &self,
        user_id: ObjectId,
        messages: &Messages,
    ) -> Result<Vec<AchievementProgress>> {
        let definitions = self.get_all_achievements(messages).await?;
        let records = self
            .user_achievement_repository
            .get_all_for_user(user_id)
            .await
            .context("Error fetching user achievements")?;

        let by_achievement: HashMap<ObjectId, UserAchievement> = records
            .into_iter()
            .map(|record| (record.achievement_id, record))
            .collect();

        Ok(definitions
            .into_iter()
            .map(|achievement| {
                let record = achievement
                    ._id
                    .and_then(|id| by_achievement.get(&id));
                AchievementProgress {
                    requirement: achievement.requirement,
                    progress: record.map(|r| r.progress).unwrap_or(0),
                    unlocked: record.map(|r| r.unlocked).unwrap_or(false),
                    unlocked_at: record.and_then(|r| r.unlocked_at),
                    achievement,
                }
            })
            .collect())
    }

    /// Advances every badge the event applies to and returns the ones that
    /// just unlocked. Already-unlocked badges are left alone.
    pub async fn apply_progress(
        &self,
        user_id: ObjectId,
        event: ProgressEvent,
    ) -> Result<Vec<Achievement>> {
        let definitions = self
            .achievement_repository
            .get_all_achievements()
            .await
            .context("Error fetching achievement definitions")?;

        let mut unlocked = Vec::new();

        for achievement in definitions {
            let Some(increment) = event.increment_for(&achievement) else {
                continue;
            };
            let Some(achievement_id) = achievement._id else {
                continue;
            };

            let mut record = self
                .user_achievement_repository
                .find_by_user_and_achievement(user_id, achievement_id)
                .await
                .context("Error fetching achievement progress")?
                .unwrap_or_else(|| UserAchievement::new(user_id, achievement_id));

            if record.unlocked {
                continue;
            }

            record.progress += increment;
            if record.progress >= achievement.requirement {
                record.unlocked = true;
                record.unlocked_at = Some(Utc::now());
                info!(
                    "User {} unlocked achievement '{}'",
                    user_id, achievement.name
                );
            }

            self.user_achievement_repository
                .save_progress(&record)
                .await
                .context("Error saving achievement progress")?;

            if record.unlocked {
                unlocked.push(achievement);
            }
        }

        Ok(unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn achievement(kind: AchievementKind, branch_id: Option<ObjectId>) -> Achievement {
        Achievement {
            _id: Some(ObjectId::new()),
            name: "badge".into(),
            description: "a badge".into(),
            kind,
            branch_id,
            requirement: 10,
            icon_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn event(branch_id: ObjectId) -> ProgressEvent {
        ProgressEvent {
            branch_id,
            correct_answer: true,
            level_completed: false,
            branch_completed: false,
        }
    }

    #[test]
    fn correct_answer_advances_correct_answer_badges() {
        let branch = ObjectId::new();
        let badge = achievement(AchievementKind::CorrectAnswers, None);
        assert_eq!(event(branch).increment_for(&badge), Some(1));
    }

    #[test]
    fn badge_scoped_to_another_branch_is_skipped() {
        let branch = ObjectId::new();
        let badge = achievement(AchievementKind::CorrectAnswers, Some(ObjectId::new()));
        assert_eq!(event(branch).increment_for(&badge), None);
    }

    #[test]
    fn badge_scoped_to_the_event_branch_applies() {
        let branch = ObjectId::new();
        let badge = achievement(AchievementKind::CorrectAnswers, Some(branch));
        assert_eq!(event(branch).increment_for(&badge), Some(1));
    }

    #[test]
    fn level_badges_ignore_plain_correct_answers() {
        let branch = ObjectId::new();
        let badge = achievement(AchievementKind::LevelsCompleted, None);
        assert_eq!(event(branch).increment_for(&badge), None);

        let mut level_event = event(branch);
        level_event.level_completed = true;
        assert_eq!(level_event.increment_for(&badge), Some(1));
    }

    #[test]
    fn branch_badges_only_fire_on_branch_completion() {
        let branch = ObjectId::new();
        let badge = achievement(AchievementKind::BranchCompleted, Some(branch));

        let mut completion = event(branch);
        completion.branch_completed = true;
        assert_eq!(completion.increment_for(&badge), Some(1));
        assert_eq!(event(branch).increment_for(&badge), None);
    }
}
