use crate::constants::CHAT_COL_NAME;
use crate::{
    config::database::get_collection,
    models::chat_model::{Chat, ChatMessage},
};
use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::{Client, Collection, error::Result};

pub struct ChatRepository {
    collection: Collection<Chat>,
}

impl ChatRepository {
    pub async fn new(client: &Client) -> Result<Self> {
        let collection = get_collection(client, (*CHAT_COL_NAME).as_str()).await?;
        Ok(Self { collection })
    }

    pub async fn find_or_create(&self, user_id: ObjectId) -> Result<Chat> {
        if let Some(existing) = self.collection.find_one(doc! { "user_id": user_id }).await? {
            return Ok(existing);
        }

        let fresh = Chat::new(user_id);
        self.collection.insert_one(&fresh).await?;
        Ok(fresh)
    }

    pub async fn push_messages(&self, user_id: ObjectId, messages: &[ChatMessage]) -> Result<()> {
        let entries = to_bson(messages)?;
        self.collection
            .update_one(
                doc! { "user_id": user_id },
                doc! {
                    "$push": { "messages": { "$each": entries } },
                    "$set": { "updated_at": to_bson(&Utc::now())? },
                },
            )
            .await?;
        Ok(())
    }

    pub async fn clear_messages(&self, user_id: ObjectId) -> Result<()> {
        self.collection
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$set": {
                    "messages": [],
                    "updated_at": to_bson(&Utc::now())?,
                } },
            )
            .await?;
        Ok(())
    }
}
