use crate::constants::SUBSCRIPTION_COL_NAME;
use crate::{
    config::database::get_collection, models::subscription_model::UserSubscription,
    types::models::subscription::status::SubscriptionStatus,
};
use chrono::{DateTime, Utc};
use futures_util::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::{Client, Collection, error::Result};

pub struct SubscriptionRepository {
    collection: Collection<UserSubscription>,
}

impl SubscriptionRepository {
    pub async fn new(client: &Client) -> Result<Self> {
        let collection = get_collection(client, (*SUBSCRIPTION_COL_NAME).as_str()).await?;
        Ok(Self { collection })
    }

    pub async fn create_subscription(
        &self,
        subscription: &UserSubscription,
    ) -> Result<UserSubscription> {
        self.collection.insert_one(subscription).await?;
        Ok(subscription.clone())
    }

    pub async fn find_subscription_by_id(
        &self,
        subscription_id: ObjectId,
    ) -> Result<Option<UserSubscription>> {
        self.collection
            .find_one(doc! { "_id": subscription_id })
            .await
    }

    /// The user's most recent non-terminal subscription, if any.
    pub async fn find_current_for_user(
        &self,
        user_id: ObjectId,
    ) -> Result<Option<UserSubscription>> {
        let mut cursor = self
            .collection
            .find(doc! {
                "user_id": user_id,
                "status": { "$in": ["pending", "trial", "active", "paused"] },
            })
            .sort(doc! { "created_at": -1 })
            .limit(1)
            .await?;
        cursor.try_next().await
    }

    pub async fn find_by_provider_id(
        &self,
        provider_subscription_id: &str,
    ) -> Result<Option<UserSubscription>> {
        self.collection
            .find_one(doc! { "provider_subscription_id": provider_subscription_id })
            .await
    }

    pub async fn set_provider_id(
        &self,
        subscription_id: ObjectId,
        provider_subscription_id: &str,
    ) -> Result<()> {
        self.collection
            .update_one(
                doc! { "_id": subscription_id },
                doc! { "$set": {
                    "provider_subscription_id": provider_subscription_id,
                    "updated_at": to_bson(&Utc::now())?,
                } },
            )
            .await?;
        Ok(())
    }

    pub async fn update_status(
        &self,
        subscription_id: ObjectId,
        status: SubscriptionStatus,
        cancelled_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let mut set = doc! {
            "status": status.to_string(),
            "updated_at": to_bson(&Utc::now())?,
        };
        if let Some(cancelled_at) = cancelled_at {
            set.insert("cancelled_at", to_bson(&cancelled_at)?);
        }

        self.collection
            .update_one(doc! { "_id": subscription_id }, doc! { "$set": set })
            .await?;
        Ok(())
    }

    pub async fn set_period(
        &self,
        subscription_id: ObjectId,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<()> {
        self.collection
            .update_one(
                doc! { "_id": subscription_id },
                doc! { "$set": {
                    "current_period_start": to_bson(&period_start)?,
                    "current_period_end": to_bson(&period_end)?,
                    "updated_at": to_bson(&Utc::now())?,
                } },
            )
            .await?;
        Ok(())
    }
}
