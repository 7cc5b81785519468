use crate::constants::USER_ACHIEVEMENT_COL_NAME;
use crate::{config::database::get_collection, models::achievement_model::UserAchievement};
use futures_util::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::{Client, Collection, error::Result};

pub struct UserAchievementRepository {
    collection: Collection<UserAchievement>,
}

impl UserAchievementRepository {
    pub async fn new(client: &Client) -> Result<Self> {
        let collection = get_collection(client, (*USER_ACHIEVEMENT_COL_NAME).as_str()).await?;
        Ok(Self { collection })
    }

    pub async fn find_by_user_and_achievement(
        &self,
        user_id: ObjectId,
        achievement_id: ObjectId,
    ) -> Result<Option<UserAchievement>> {
        self.collection
            .find_one(doc! { "user_id": user_id, "achievement_id": achievement_id })
            .await
    }

    pub async fn get_all_for_user(&self, user_id: ObjectId) -> Result<Vec<UserAchievement>> {
        let cursor = self.collection.find(doc! { "user_id": user_id }).await?;
        let records: Vec<UserAchievement> = cursor.try_collect().await?;
        Ok(records)
    }

    /// Upserts the progress counter; `unlocked_at` is only ever set once.
    pub async fn save_progress(&self, record: &UserAchievement) -> Result<()> {
        let mut set = doc! {
            "progress": record.progress as i64,
            "unlocked": record.unlocked,
        };
        if let Some(unlocked_at) = record.unlocked_at {
            set.insert("unlocked_at", to_bson(&unlocked_at)?);
        }

        self.collection
            .update_one(
                doc! {
                    "user_id": record.user_id,
                    "achievement_id": record.achievement_id,
                },
                doc! { "$set": set },
            )
            .upsert(true)
            .await?;
        Ok(())
    }
}
