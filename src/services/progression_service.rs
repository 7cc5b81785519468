use crate::{
    constants::QUESTIONS_PER_LEVEL,
    models::{user_answer_model::UserAnswer, user_level_model::UserLevel},
    repositories::{
        branch_repository::BranchRepository, question_repository::QuestionRepository,
        user_answer_repository::UserAnswerRepository, user_level_repository::UserLevelRepository,
    },
    services::achievement_service::{AchievementService, ProgressEvent},
    types::responses::answer_outcome::AnswerOutcome,
    utils::locale_utils::{Messages, Namespace},
};
use anyhow::{Context, Result, anyhow};
use bson::oid::ObjectId;
use chrono::Utc;
use log::info;
use std::sync::Arc;

/// What applying one answer did to a progress record.
#[derive(Debug, PartialEq, Eq)]
pub struct LevelOutcome {
    /// The answer targeted the user's current level and moved its counters.
    pub counted: bool,
    pub level_completed: bool,
    pub branch_completed: bool,
}

/// Applies one graded answer to a progress record.
///
/// Only answers for the current level advance the counters; a level completes
/// once `QUESTIONS_PER_LEVEL` answers in it were correct, never on answer
/// count alone. Completion pushes the level, resets the counters and bumps
/// `current_level` up to `level_count`.
pub fn apply_answer(
    user_level: &mut UserLevel,
    question_level: u32,
    is_correct: bool,
    level_count: u32,
) -> LevelOutcome {
    if question_level != user_level.current_level {
        return LevelOutcome {
            counted: false,
            level_completed: false,
            branch_completed: false,
        };
    }

    user_level.questions_answered_in_level += 1;
    if is_correct {
        user_level.correct_in_level += 1;
    }

    if user_level.correct_in_level < QUESTIONS_PER_LEVEL {
        return LevelOutcome {
            counted: true,
            level_completed: false,
            branch_completed: false,
        };
    }

    let completed = user_level.current_level;
    if !user_level.completed_levels.contains(&completed) {
        user_level.completed_levels.push(completed);
    }
    user_level.questions_answered_in_level = 0;
    user_level.correct_in_level = 0;
    if user_level.current_level < level_count {
        user_level.current_level += 1;
    }

    LevelOutcome {
        counted: true,
        level_completed: true,
        branch_completed: user_level.branch_completed(level_count),
    }
}

pub struct ProgressionService {
    question_repository: Arc<QuestionRepository>,
    branch_repository: Arc<BranchRepository>,
    user_answer_repository: Arc<UserAnswerRepository>,
    user_level_repository: Arc<UserLevelRepository>,
    achievement_service: Arc<AchievementService>,
}

impl ProgressionService {
    pub fn new(
        question_repository: Arc<QuestionRepository>,
        branch_repository: Arc<BranchRepository>,
        user_answer_repository: Arc<UserAnswerRepository>,
        user_level_repository: Arc<UserLevelRepository>,
        achievement_service: Arc<AchievementService>,
    ) -> Self {
        Self {
            question_repository,
            branch_repository,
            user_answer_repository,
            user_level_repository,
            achievement_service,
        }
    }

    /// The only entry point that records answers and moves progression.
    pub async fn record_answer(
        &self,
        user_id: ObjectId,
        question_id: ObjectId,
        selected_index: u32,
        messages: &Messages,
    ) -> Result<AnswerOutcome> {
        let question = self
            .question_repository
            .find_question_by_id(question_id)
            .await
            .context("Error fetching question")?
            .ok_or_else(|| {
                anyhow!(messages.get_str(
                    Namespace::Quiz,
                    "question.not_found",
                    "Question not found",
                ))
            })?;

        if selected_index as usize >= question.options.len() {
            return Err(anyhow!(messages.get_str(
                Namespace::Quiz,
                "answer.invalid_option",
                "Selected option is out of range",
            )));
        }

        // The unique (user_id, question_id) index is the backstop; this read
        // produces the friendly error before we hit it.
        if self
            .user_answer_repository
            .find_by_user_and_question(user_id, question_id)
            .await
            .context("Error checking existing answer")?
            .is_some()
        {
            return Err(anyhow!(messages.get_str(
                Namespace::Quiz,
                "answer.duplicate",
                "This question has already been answered",
            )));
        }

        let branch = self
            .branch_repository
            .find_branch_by_id(question.branch_id)
            .await
            .context("Error fetching branch")?
            .ok_or_else(|| {
                anyhow!(messages.get_str(Namespace::Quiz, "branch.not_found", "Branch not found",))
            })?;

        let is_correct = selected_index == question.correct_index;

        let answer = UserAnswer {
            _id: Some(ObjectId::new()),
            user_id,
            question_id,
            branch_id: question.branch_id,
            level: question.level,
            selected_index,
            is_correct,
            answered_at: Utc::now(),
        };
        self.user_answer_repository
            .create_answer(&answer)
            .await
            .context("Error recording answer")?;

        let mut user_level = self
            .user_level_repository
            .find_or_create(user_id, question.branch_id)
            .await
            .context("Error loading level progress")?;

        let outcome = apply_answer(
            &mut user_level,
            question.level,
            is_correct,
            branch.level_count,
        );
        self.user_level_repository
            .save_progress(&user_level)
            .await
            .context("Error saving level progress")?;

        if outcome.level_completed {
            info!(
                "User {} completed level {} of branch '{}'",
                user_id,
                user_level.completed_levels.last().copied().unwrap_or(0),
                branch.name
            );
        }

        let unlocked = self
            .achievement_service
            .apply_progress(
                user_id,
                ProgressEvent {
                    branch_id: question.branch_id,
                    correct_answer: is_correct,
                    level_completed: outcome.level_completed,
                    branch_completed: outcome.branch_completed,
                },
            )
            .await
            .context("Error applying achievement progress")?;

        Ok(AnswerOutcome {
            is_correct,
            correct_index: question.correct_index,
            explanation: question.explanation,
            level_completed: outcome.level_completed,
            current_level: user_level.current_level,
            unlocked,
        })
    }

    /// Progress in one branch. First touch creates the record at level 1, so
    /// the client always gets something to render.
    pub async fn get_branch_progress(
        &self,
        user_id: ObjectId,
        branch_id: ObjectId,
        messages: &Messages,
    ) -> Result<UserLevel> {
        self.branch_repository
            .find_branch_by_id(branch_id)
            .await
            .context("Error fetching branch")?
            .ok_or_else(|| {
                anyhow!(messages.get_str(Namespace::Quiz, "branch.not_found", "Branch not found",))
            })?;

        self.user_level_repository
            .find_or_create(user_id, branch_id)
            .await
            .map_err(|e| {
                anyhow!(messages.get_str(
                    Namespace::Quiz,
                    "level.fetch_error",
                    "Error fetching level progress",
                ))
                .context(format!("Error loading level progress: {}", e))
            })
    }

    pub async fn get_all_progress(
        &self,
        user_id: ObjectId,
        messages: &Messages,
    ) -> Result<Vec<UserLevel>> {
        self.user_level_repository
            .get_all_for_user(user_id)
            .await
            .map_err(|e| {
                anyhow!(messages.get_str(
                    Namespace::Quiz,
                    "level.fetch_error",
                    "Error fetching level progress",
                ))
                .context(format!("Error fetching level progress: {}", e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_level() -> UserLevel {
        UserLevel::new(ObjectId::new(), ObjectId::new())
    }

    #[test]
    fn answers_for_other_levels_do_not_count() {
        let mut level = fresh_level();
        let outcome = apply_answer(&mut level, 5, true, 10);

        assert!(!outcome.counted);
        assert_eq!(level.questions_answered_in_level, 0);
        assert_eq!(level.correct_in_level, 0);
    }

    #[test]
    fn wrong_answers_count_attempts_but_never_complete() {
        let mut level = fresh_level();
        for _ in 0..50 {
            let outcome = apply_answer(&mut level, 1, false, 10);
            assert!(!outcome.level_completed);
        }
        assert_eq!(level.questions_answered_in_level, 50);
        assert_eq!(level.correct_in_level, 0);
        assert_eq!(level.current_level, 1);
    }

    #[test]
    fn ten_correct_answers_complete_the_level() {
        let mut level = fresh_level();
        for i in 0..QUESTIONS_PER_LEVEL {
            let outcome = apply_answer(&mut level, 1, true, 10);
            if i + 1 < QUESTIONS_PER_LEVEL {
                assert!(!outcome.level_completed);
            } else {
                assert!(outcome.level_completed);
            }
        }

        assert_eq!(level.current_level, 2);
        assert_eq!(level.completed_levels, vec![1]);
        assert_eq!(level.questions_answered_in_level, 0);
        assert_eq!(level.correct_in_level, 0);
    }

    #[test]
    fn mixed_answers_require_ten_correct_not_ten_answered() {
        let mut level = fresh_level();
        for _ in 0..9 {
            apply_answer(&mut level, 1, true, 10);
        }
        // 9 correct + 3 wrong = 12 answered; still on level 1
        for _ in 0..3 {
            let outcome = apply_answer(&mut level, 1, false, 10);
            assert!(!outcome.level_completed);
        }
        assert_eq!(level.current_level, 1);

        let outcome = apply_answer(&mut level, 1, true, 10);
        assert!(outcome.level_completed);
        assert_eq!(level.current_level, 2);
    }

    #[test]
    fn final_level_caps_current_level_and_completes_the_branch() {
        let mut level = fresh_level();
        level.current_level = 3;
        level.completed_levels = vec![1, 2];

        let mut last = None;
        for _ in 0..QUESTIONS_PER_LEVEL {
            last = Some(apply_answer(&mut level, 3, true, 3));
        }

        let outcome = last.unwrap();
        assert!(outcome.level_completed);
        assert!(outcome.branch_completed);
        assert_eq!(level.current_level, 3);
        assert_eq!(level.completed_levels, vec![1, 2, 3]);
    }

    #[test]
    fn branch_completed_requires_every_level() {
        let mut level = fresh_level();
        level.current_level = 3;
        level.completed_levels = vec![1]; // level 2 skipped by an admin reset

        for _ in 0..QUESTIONS_PER_LEVEL {
            apply_answer(&mut level, 3, true, 3);
        }
        assert!(!level.branch_completed(3));
    }
}
