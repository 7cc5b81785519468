use crate::types::models::subscription::{provider::PaymentProvider, status::SubscriptionStatus};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's billing record against a [`Plan`](crate::models::plan_model::Plan).
///
/// `days_remaining` and `is_expired` were virtuals on the original document;
/// here they are plain accessors computed from the period bounds.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserSubscription {
    #[serde(default)]
    pub _id: Option<ObjectId>,

    pub user_id: ObjectId,

    pub plan_id: ObjectId,

    pub status: SubscriptionStatus,

    pub provider: PaymentProvider,

    /// Stripe subscription id / checkout session id, or PayPal order id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_subscription_id: Option<String>,

    pub current_period_start: DateTime<Utc>,

    pub current_period_end: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_ends_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl UserSubscription {
    pub fn days_remaining(&self) -> i64 {
        self.days_remaining_at(Utc::now())
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn days_remaining_at(&self, now: DateTime<Utc>) -> i64 {
        let end = match self.status {
            SubscriptionStatus::Trial => self.trial_ends_at.unwrap_or(self.current_period_end),
            _ => self.current_period_end,
        };
        (end - now).num_days().max(0)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            SubscriptionStatus::Expired => true,
            SubscriptionStatus::Trial => {
                self.trial_ends_at.unwrap_or(self.current_period_end) <= now
            }
            _ => self.current_period_end <= now,
        }
    }

    /// Premium access requires a live status AND a period that has not run out.
    pub fn grants_access(&self) -> bool {
        self.status.grants_access() && !self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn subscription(status: SubscriptionStatus) -> UserSubscription {
        let now = Utc::now();
        UserSubscription {
            _id: Some(ObjectId::new()),
            user_id: ObjectId::new(),
            plan_id: ObjectId::new(),
            status,
            provider: PaymentProvider::Stripe,
            provider_subscription_id: None,
            current_period_start: now,
            current_period_end: now + Duration::days(30),
            trial_ends_at: None,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn days_remaining_counts_down_to_period_end() {
        let sub = subscription(SubscriptionStatus::Active);
        let five_days_in = sub.current_period_start + Duration::days(25);
        assert_eq!(sub.days_remaining_at(five_days_in), 5);
    }

    #[test]
    fn days_remaining_never_goes_negative() {
        let sub = subscription(SubscriptionStatus::Active);
        let long_after = sub.current_period_end + Duration::days(10);
        assert_eq!(sub.days_remaining_at(long_after), 0);
    }

    #[test]
    fn trial_expiry_uses_trial_end_not_period_end() {
        let mut sub = subscription(SubscriptionStatus::Trial);
        sub.trial_ends_at = Some(sub.current_period_start + Duration::days(7));

        let day_eight = sub.current_period_start + Duration::days(8);
        assert!(sub.is_expired_at(day_eight));
        assert_eq!(sub.days_remaining_at(day_eight), 0);
    }

    #[test]
    fn active_subscription_within_period_grants_access() {
        let sub = subscription(SubscriptionStatus::Active);
        assert!(sub.grants_access());
    }

    #[test]
    fn cancelled_subscription_never_grants_access() {
        let sub = subscription(SubscriptionStatus::Cancelled);
        assert!(!sub.grants_access());
    }

    #[test]
    fn expired_status_is_expired_regardless_of_dates() {
        let sub = subscription(SubscriptionStatus::Expired);
        assert!(sub.is_expired_at(sub.current_period_start));
    }
}
