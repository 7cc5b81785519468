use crate::{
    models::question_model::Question,
    repositories::{
        branch_repository::BranchRepository, question_repository::QuestionRepository,
    },
    types::requests::question::{
        create_question_request::CreateQuestionRequest,
        update_question_request::UpdateQuestionRequest,
    },
    utils::locale_utils::{Messages, Namespace},
};
use anyhow::{Context, Result, anyhow};
use bson::oid::ObjectId;
use chrono::Utc;
use std::sync::Arc;

const MIN_OPTIONS: usize = 2;

pub struct QuestionService {
    pub question_repository: Arc<QuestionRepository>,
    pub branch_repository: Arc<BranchRepository>,
}

impl QuestionService {
    pub fn new(
        question_repository: Arc<QuestionRepository>,
        branch_repository: Arc<BranchRepository>,
    ) -> Self {
        Self {
            question_repository,
            branch_repository,
        }
    }

    pub async fn create_question(
        &self,
        request: CreateQuestionRequest,
        messages: &Messages,
    ) -> Result<Question> {
        let branch_id = ObjectId::parse_str(&request.branch_id).map_err(|_| {
            anyhow!(messages.get_str(Namespace::Quiz, "branch.invalid_id", "Invalid branch id",))
        })?;

        let branch = self
            .branch_repository
            .find_branch_by_id(branch_id)
            .await
            .context("Error fetching branch")?
            .ok_or_else(|| {
                anyhow!(messages.get_str(Namespace::Quiz, "branch.not_found", "Branch not found",))
            })?;

        if request.level < 1 || request.level > branch.level_count {
            return Err(anyhow!(messages.get_str(
                Namespace::Quiz,
                "question.invalid_level",
                "Level is outside the branch range",
            )));
        }

        if request.options.len() < MIN_OPTIONS
            || request.correct_index as usize >= request.options.len()
        {
            return Err(anyhow!(messages.get_str(
                Namespace::Quiz,
                "question.invalid_options",
                "Questions need at least two options and a valid correct index",
            )));
        }

        let now = Utc::now();
        let question = Question {
            _id: Some(ObjectId::new()),
            branch_id,
            level: request.level,
            text: request.text,
            options: request.options,
            correct_index: request.correct_index,
            explanation: request.explanation,
            created_at: now,
            updated_at: now,
        };

        self.question_repository
            .create_question(&question)
            .await
            .context("DB insert failed")
    }

    pub async fn get_questions_for_level(
        &self,
        branch_id: ObjectId,
        level: u32,
        messages: &Messages,
    ) -> Result<Vec<Question>> {
        self.question_repository
            .find_by_branch_and_level(branch_id, level)
            .await
            .map_err(|e| {
                anyhow!(messages.get_str(
                    Namespace::Quiz,
                    "question.fetch_error",
                    "Error fetching questions",
                ))
                .context(format!("Error fetching questions: {}", e))
            })
    }

    pub async fn update_question(
        &self,
        question_id: ObjectId,
        update: UpdateQuestionRequest,
        messages: &Messages,
    ) -> Result<Option<Question>> {
        if let (Some(options), Some(correct_index)) = (&update.options, update.correct_index) {
            if options.len() < MIN_OPTIONS || correct_index as usize >= options.len() {
                return Err(anyhow!(messages.get_str(
                    Namespace::Quiz,
                    "question.invalid_options",
                    "Questions need at least two options and a valid correct index",
                )));
            }
        }

        self.question_repository
            .update_question(question_id, &update)
            .await
            .map_err(|e| {
                anyhow!(messages.get_str(
                    Namespace::Quiz,
                    "question.update_error",
                    "Error updating question",
                ))
                .context(format!("Error updating question: {}", e))
            })
    }

    pub async fn delete_question(&self, question_id: ObjectId, messages: &Messages) -> Result<()> {
        self.question_repository
            .delete_question(question_id)
            .await
            .map_err(|e| {
                anyhow!(messages.get_str(
                    Namespace::Quiz,
                    "question.delete_error",
                    "Error deleting question",
                ))
                .context(format!("Error deleting question: {}", e))
            })
    }
}
