use crate::types::models::subscription::provider::PaymentProvider;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub plan_id: String,

    pub provider: PaymentProvider,
}
