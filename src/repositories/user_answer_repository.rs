use crate::constants::USER_ANSWER_COL_NAME;
use crate::{config::database::get_collection, models::user_answer_model::UserAnswer};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection, error::Result};

pub struct UserAnswerRepository {
    collection: Collection<UserAnswer>,
}

impl UserAnswerRepository {
    pub async fn new(client: &Client) -> Result<Self> {
        let collection = get_collection(client, (*USER_ANSWER_COL_NAME).as_str()).await?;
        Ok(Self { collection })
    }

    pub async fn create_answer(&self, answer: &UserAnswer) -> Result<UserAnswer> {
        self.collection.insert_one(answer).await?;
        Ok(answer.clone())
    }

    pub async fn find_by_user_and_question(
        &self,
        user_id: ObjectId,
        question_id: ObjectId,
    ) -> Result<Option<UserAnswer>> {
        self.collection
            .find_one(doc! { "user_id": user_id, "question_id": question_id })
            .await
    }
}
