use crate::constants::USER_LEVEL_COL_NAME;
use crate::{config::database::get_collection, models::user_level_model::UserLevel};
use chrono::Utc;
use futures_util::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, to_document};
use mongodb::{Client, Collection, error::Result};

pub struct UserLevelRepository {
    collection: Collection<UserLevel>,
}

impl UserLevelRepository {
    pub async fn new(client: &Client) -> Result<Self> {
        let collection = get_collection(client, (*USER_LEVEL_COL_NAME).as_str()).await?;
        Ok(Self { collection })
    }

    pub async fn find_by_user_and_branch(
        &self,
        user_id: ObjectId,
        branch_id: ObjectId,
    ) -> Result<Option<UserLevel>> {
        self.collection
            .find_one(doc! { "user_id": user_id, "branch_id": branch_id })
            .await
    }

    /// Fetches the progress record, creating it at level 1 on first touch.
    pub async fn find_or_create(
        &self,
        user_id: ObjectId,
        branch_id: ObjectId,
    ) -> Result<UserLevel> {
        if let Some(existing) = self.find_by_user_and_branch(user_id, branch_id).await? {
            return Ok(existing);
        }

        let fresh = UserLevel::new(user_id, branch_id);
        self.collection.insert_one(&fresh).await?;
        Ok(fresh)
    }

    pub async fn get_all_for_user(&self, user_id: ObjectId) -> Result<Vec<UserLevel>> {
        let cursor = self.collection.find(doc! { "user_id": user_id }).await?;
        let levels: Vec<UserLevel> = cursor.try_collect().await?;
        Ok(levels)
    }

    /// Replaces the mutable progression fields in one write.
    pub async fn save_progress(&self, level: &UserLevel) -> Result<()> {
        let mut update_doc = to_document(level)?;
        update_doc.remove("_id");
        update_doc.insert("updated_at", to_bson(&Utc::now())?);

        self.collection
            .update_one(
                doc! { "user_id": level.user_id, "branch_id": level.branch_id },
                doc! { "$set": update_doc },
            )
            .await?;
        Ok(())
    }
}
