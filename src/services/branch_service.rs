use crate::{
    constants::DEFAULT_LEVEL_COUNT,
    models::branch_model::Branch,
    repositories::branch_repository::BranchRepository,
    types::requests::branch::{
        create_branch_request::CreateBranchRequest, update_branch_request::UpdateBranchRequest,
    },
    utils::locale_utils::{Messages, Namespace},
};
use anyhow::{Context, Result, anyhow};
use bson::oid::ObjectId;
use chrono::Utc;
use std::sync::Arc;

pub struct BranchService {
    pub branch_repository: Arc<BranchRepository>,
}

impl BranchService {
    pub fn new(branch_repository: Arc<BranchRepository>) -> Self {
        Self { branch_repository }
    }

    pub async fn create_branch(
        &self,
        request: CreateBranchRequest,
        messages: &Messages,
    ) -> Result<Branch> {
        if self
            .branch_repository
            .find_branch_by_name(&request.name)
            .await
            .context(format!(
                "Error checking existing branch named '{}'",
                request.name
            ))?
            .is_some()
        {
            return Err(anyhow!(messages.get_str(
                Namespace::Quiz,
                "branch.duplicate",
                "A branch with this name already exists",
            )));
        }

        let now = Utc::now();
        let branch = Branch {
            _id: Some(ObjectId::new()),
            name: request.name,
            description: request.description,
            icon_url: request.icon_url,
            level_count: request.level_count.unwrap_or(DEFAULT_LEVEL_COUNT),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.branch_repository
            .create_branch(&branch)
            .await
            .context("DB insert failed")
    }

    pub async fn get_branch(
        &self,
        branch_id: ObjectId,
        messages: &Messages,
    ) -> Result<Option<Branch>> {
        self.branch_repository
            .find_branch_by_id(branch_id)
            .await
            .map_err(|e| {
                anyhow!(messages.get_str(
                    Namespace::Quiz,
                    "branch.fetch_error",
                    "Error retrieving branch",
                ))
                .context(format!("Error retrieving branch: {}", e))
            })
    }

    pub async fn get_all_branches(
        &self,
        active_only: bool,
        messages: &Messages,
    ) -> Result<Vec<Branch>> {
        self.branch_repository
            .get_all_branches(active_only)
            .await
            .map_err(|e| {
                anyhow!(messages.get_str(
                    Namespace::Quiz,
                    "branch.fetch_error",
                    "Error fetching branches",
                ))
                .context(format!("Error fetching branches: {}", e))
            })
    }

    pub async fn update_branch(
        &self,
        branch_id: ObjectId,
        update: UpdateBranchRequest,
        messages: &Messages,
    ) -> Result<Option<Branch>> {
        self.branch_repository
            .update_branch(branch_id, &update)
            .await
            .map_err(|e| {
                anyhow!(messages.get_str(
                    Namespace::Quiz,
                    "branch.update_error",
                    "Error updating branch",
                ))
                .context(format!("Error updating branch: {}", e))
            })
    }

    pub async fn delete_branch(&self, branch_id: ObjectId, messages: &Messages) -> Result<()> {
        self.branch_repository
            .delete_branch(branch_id)
            .await
            .map_err(|e| {
                anyhow!(messages.get_str(
                    Namespace::Quiz,
                    "branch.delete_error",
                    "Error deleting branch",
                ))
                .context(format!("Error deleting branch: {}", e))
            })
    }
}
