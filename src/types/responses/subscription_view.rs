use crate::models::subscription_model::UserSubscription;
use serde::Serialize;

/// A subscription document plus its computed accessors, serialized together
/// the way the original exposed them as virtuals.
#[derive(Debug, Serialize)]
pub struct SubscriptionView {
    #[serde(flatten)]
    pub subscription: UserSubscription,
    pub days_remaining: i64,
    pub is_expired: bool,
}

impl From<UserSubscription> for SubscriptionView {
    fn from(subscription: UserSubscription) -> Self {
        let days_remaining = subscription.days_remaining();
        let is_expired = subscription.is_expired();
        Self {
            subscription,
            days_remaining,
            is_expired,
        }
    }
}
