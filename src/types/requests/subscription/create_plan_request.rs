use crate::types::models::subscription::billing_cycle::BillingCycle;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub name: String,

    pub description: String,

    pub price_cents: i64,

    pub currency: String,

    pub billing_cycle: BillingCycle,

    #[serde(default)]
    pub trial_days: u32,

    #[serde(default)]
    pub features: Vec<String>,
}
