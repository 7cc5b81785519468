use crate::types::models::subscription::billing_cycle::BillingCycle;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_is_active() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Plan {
    #[serde(default)]
    pub _id: Option<ObjectId>,

    pub name: String,

    pub description: String,

    pub price_cents: i64,

    pub currency: String,

    pub billing_cycle: BillingCycle,

    #[serde(default)]
    pub trial_days: u32,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default = "default_is_active")]
    pub is_active: bool,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}
