use crate::constants::BRANCH_COL_NAME;
use crate::{
    config::database::get_collection, models::branch_model::Branch,
    types::requests::branch::update_branch_request::UpdateBranchRequest,
};
use chrono::Utc;
use futures_util::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, to_document};
use mongodb::{Client, Collection, error::Result};

pub struct BranchRepository {
    collection: Collection<Branch>,
}

impl BranchRepository {
    pub async fn new(client: &Client) -> Result<Self> {
        let collection = get_collection(client, (*BRANCH_COL_NAME).as_str()).await?;
        Ok(Self { collection })
    }

    pub async fn create_branch(&self, branch: &Branch) -> Result<Branch> {
        self.collection.insert_one(branch).await?;
        Ok(branch.clone())
    }

    pub async fn find_branch_by_id(&self, branch_id: ObjectId) -> Result<Option<Branch>> {
        self.collection.find_one(doc! { "_id": branch_id }).await
    }

    pub async fn find_branch_by_name(&self, name: &str) -> Result<Option<Branch>> {
        self.collection.find_one(doc! { "name": name }).await
    }

    pub async fn get_all_branches(&self, active_only: bool) -> Result<Vec<Branch>> {
        let filter = if active_only {
            doc! { "is_active": true }
        } else {
            doc! {}
        };
        let cursor = self.collection.find(filter).await?;
        let branches: Vec<Branch> = cursor.try_collect().await?;
        Ok(branches)
    }

    pub async fn update_branch(
        &self,
        branch_id: ObjectId,
        update: &UpdateBranchRequest,
    ) -> Result<Option<Branch>> {
        let mut update_doc = to_document(update)?;
        update_doc.insert("updated_at", to_bson(&Utc::now())?);

        self.collection
            .update_one(doc! { "_id": branch_id }, doc! { "$set": update_doc })
            .await?;

        self.find_branch_by_id(branch_id).await
    }

    pub async fn delete_branch(&self, branch_id: ObjectId) -> Result<()> {
        self.collection.delete_one(doc! { "_id": branch_id }).await?;
        Ok(())
    }
}
