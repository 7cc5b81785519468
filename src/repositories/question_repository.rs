use crate::constants::QUESTION_COL_NAME;
use crate::{
    config::database::get_collection, models::question_model::Question,
    types::requests::question::update_question_request::UpdateQuestionRequest,
};
use chrono::Utc;
use futures_util::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, to_document};
use mongodb::{Client, Collection, error::Result};

pub struct QuestionRepository {
    collection: Collection<Question>,
}

impl QuestionRepository {
    pub async fn new(client: &Client) -> Result<Self> {
        let collection = get_collection(client, (*QUESTION_COL_NAME).as_str()).await?;
        Ok(Self { collection })
    }

    pub async fn create_question(&self, question: &Question) -> Result<Question> {
        self.collection.insert_one(question).await?;
        Ok(question.clone())
    }

    pub async fn find_question_by_id(&self, question_id: ObjectId) -> Result<Option<Question>> {
        self.collection.find_one(doc! { "_id": question_id }).await
    }

    pub async fn find_by_branch_and_level(
        &self,
        branch_id: ObjectId,
        level: u32,
    ) -> Result<Vec<Question>> {
        let cursor = self
            .collection
            .find(doc! { "branch_id": branch_id, "level": level as i64 })
            .await?;
        let questions: Vec<Question> = cursor.try_collect().await?;
        Ok(questions)
    }

    pub async fn update_question(
        &self,
        question_id: ObjectId,
        update: &UpdateQuestionRequest,
    ) -> Result<Option<Question>> {
        let mut update_doc = to_document(update)?;
        update_doc.insert("updated_at", to_bson(&Utc::now())?);

        self.collection
            .update_one(doc! { "_id": question_id }, doc! { "$set": update_doc })
            .await?;

        self.find_question_by_id(question_id).await
    }

    pub async fn delete_question(&self, question_id: ObjectId) -> Result<()> {
        self.collection
            .delete_one(doc! { "_id": question_id })
            .await?;
        Ok(())
    }
}
