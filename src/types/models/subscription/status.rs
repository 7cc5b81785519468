use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Billing lifecycle of a [`UserSubscription`](crate::models::subscription_model::UserSubscription).
///
/// Transitions are validated by `SubscriptionService::transition`; webhook
/// handlers never write this field directly.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubscriptionStatus {
    Pending,
    Trial,
    Active,
    Paused,
    Cancelled,
    Expired,
}

impl SubscriptionStatus {
    /// Whether this status grants access to premium features, ignoring
    /// period-end expiry (checked separately on the document).
    pub fn grants_access(self) -> bool {
        matches!(self, Self::Trial | Self::Active)
    }
}
