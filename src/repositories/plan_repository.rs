use crate::constants::PLAN_COL_NAME;
use crate::{config::database::get_collection, models::plan_model::Plan};
use futures_util::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection, error::Result};

pub struct PlanRepository {
    collection: Collection<Plan>,
}

impl PlanRepository {
    pub async fn new(client: &Client) -> Result<Self> {
        let collection = get_collection(client, (*PLAN_COL_NAME).as_str()).await?;
        Ok(Self { collection })
    }

    pub async fn create_plan(&self, plan: &Plan) -> Result<Plan> {
        self.collection.insert_one(plan).await?;
        Ok(plan.clone())
    }

    pub async fn find_plan_by_id(&self, plan_id: ObjectId) -> Result<Option<Plan>> {
        self.collection.find_one(doc! { "_id": plan_id }).await
    }

    pub async fn get_active_plans(&self) -> Result<Vec<Plan>> {
        let cursor = self.collection.find(doc! { "is_active": true }).await?;
        let plans: Vec<Plan> = cursor.try_collect().await?;
        Ok(plans)
    }
}
