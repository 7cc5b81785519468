use crate::constants::ACHIEVEMENT_COL_NAME;
use crate::{config::database::get_collection, models::achievement_model::Achievement};
use futures_util::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection, error::Result};

pub struct AchievementRepository {
    collection: Collection<Achievement>,
}

impl AchievementRepository {
    pub async fn new(client: &Client) -> Result<Self> {
        let collection = get_collection(client, (*ACHIEVEMENT_COL_NAME).as_str()).await?;
        Ok(Self { collection })
    }

    pub async fn create_achievement(&self, achievement: &Achievement) -> Result<Achievement> {
        self.collection.insert_one(achievement).await?;
        Ok(achievement.clone())
    }

    pub async fn get_all_achievements(&self) -> Result<Vec<Achievement>> {
        let cursor = self.collection.find(doc! {}).await?;
        let achievements: Vec<Achievement> = cursor.try_collect().await?;
        Ok(achievements)
    }
}
