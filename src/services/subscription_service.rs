use crate::{
    models::{plan_model::Plan, subscription_model::UserSubscription},
    repositories::{
        plan_repository::PlanRepository, subscription_repository::SubscriptionRepository,
    },
    types::{
        models::subscription::{provider::PaymentProvider, status::SubscriptionStatus},
        requests::subscription::{
            create_plan_request::CreatePlanRequest, subscribe_request::SubscribeRequest,
        },
    },
    utils::locale_utils::{Messages, Namespace},
};
use anyhow::{Context, Result, anyhow};
use bson::oid::ObjectId;
use chrono::{Duration, Utc};
use log::{info, warn};
use std::sync::Arc;

/// Lifecycle events, whether they come from our own endpoints or from a
/// provider webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionEvent {
    Activated,
    Cancelled,
    PaymentFailed,
    Paused,
    Resumed,
}

/// A provider webhook event reduced to what the lifecycle needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEvent {
    pub event: SubscriptionEvent,
    /// Provider-side id the payload identifies the subscription by.
    pub reference: String,
    /// Our own subscription id when the provider echoes it back
    /// (Stripe `client_reference_id`, PayPal `custom_id`).
    pub internal_reference: Option<String>,
    /// Durable provider subscription id carried by activation payloads.
    /// Checkout references are one-shot, so this replaces the stored
    /// reference and later lifecycle events resolve by it.
    pub durable_reference: Option<String>,
}

/// Outcome of applying an event to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed(SubscriptionStatus),
    /// The subscription is already where the event wants it; webhook
    /// retries land here.
    NoOp,
    Rejected,
}

/// The entire status machine. Every status write in the system funnels
/// through this function.
pub fn transition(current: SubscriptionStatus, event: SubscriptionEvent) -> Transition {
    use SubscriptionEvent as E;
    use SubscriptionStatus as S;

    match (current, event) {
        (S::Active, E::Activated) => Transition::NoOp,
        (S::Pending | S::Trial | S::Paused, E::Activated) => Transition::Changed(S::Active),

        (S::Cancelled, E::Cancelled) => Transition::NoOp,
        (S::Pending | S::Trial | S::Active | S::Paused, E::Cancelled) => {
            Transition::Changed(S::Cancelled)
        }

        (S::Expired, E::PaymentFailed) => Transition::NoOp,
        (S::Trial | S::Active | S::Paused, E::PaymentFailed) => Transition::Changed(S::Expired),

        (S::Paused, E::Paused) => Transition::NoOp,
        (S::Active, E::Paused) => Transition::Changed(S::Paused),

        (S::Active, E::Resumed) => Transition::NoOp,
        (S::Paused, E::Resumed) => Transition::Changed(S::Active),

        _ => Transition::Rejected,
    }
}

pub struct SubscriptionService {
    pub plan_repository: Arc<PlanRepository>,
    pub subscription_repository: Arc<SubscriptionRepository>,
}

impl SubscriptionService {
    pub fn new(
        plan_repository: Arc<PlanRepository>,
        subscription_repository: Arc<SubscriptionRepository>,
    ) -> Self {
        Self {
            plan_repository,
            subscription_repository,
        }
    }

    pub async fn create_plan(&self, request: CreatePlanRequest, messages: &Messages) -> Result<Plan> {
        let now = Utc::now();
        let plan = Plan {
            _id: Some(ObjectId::new()),
            name: request.name,
            description: request.description,
            price_cents: request.price_cents,
            currency: request.currency,
            billing_cycle: request.billing_cycle,
            trial_days: request.trial_days,
            features: request.features,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.plan_repository.create_plan(&plan).await.map_err(|e| {
            anyhow!(messages.get_str(
                Namespace::Subscription,
                "plan.create_error",
                "Error creating plan",
            ))
            .context(format!("Error creating plan: {}", e))
        })
    }

    pub async fn get_active_plans(&self, messages: &Messages) -> Result<Vec<Plan>> {
        self.plan_repository.get_active_plans().await.map_err(|e| {
            anyhow!(messages.get_str(
                Namespace::Subscription,
                "plan.fetch_error",
                "Error fetching plans",
            ))
            .context(format!("Error fetching plans: {}", e))
        })
    }

    /// Creates the user's subscription record. Plans with trial days start
    /// in `trial` right away; everything else waits in `pending` for the
    /// provider's activation webhook.
    pub async fn subscribe(
        &self,
        user_id: ObjectId,
        request: SubscribeRequest,
        messages: &Messages,
    ) -> Result<UserSubscription> {
        let plan_id = ObjectId::parse_str(&request.plan_id).map_err(|_| {
            anyhow!(messages.get_str(Namespace::Subscription, "plan.invalid_id", "Invalid plan id",))
        })?;

        let plan = self
            .plan_repository
            .find_plan_by_id(plan_id)
            .await
            .context("Error fetching plan")?
            .filter(|plan| plan.is_active)
            .ok_or_else(|| {
                anyhow!(messages.get_str(
                    Namespace::Subscription,
                    "plan.not_found",
                    "Plan not found",
                ))
            })?;

        if let Some(existing) = self
            .subscription_repository
            .find_current_for_user(user_id)
            .await
            .context("Error checking current subscription")?
        {
            if !existing.is_expired() {
                return Err(anyhow!(messages.get_str(
                    Namespace::Subscription,
                    "subscribe.already_subscribed",
                    "An active subscription already exists",
                )));
            }
        }

        let now = Utc::now();
        let on_trial = plan.trial_days > 0;
        let subscription = UserSubscription {
            _id: Some(ObjectId::new()),
            user_id,
            plan_id,
            status: if on_trial {
                SubscriptionStatus::Trial
            } else {
                SubscriptionStatus::Pending
            },
            provider: request.provider,
            provider_subscription_id: None,
            current_period_start: now,
            current_period_end: now + Duration::days(plan.billing_cycle.period_days()),
            trial_ends_at: on_trial.then(|| now + Duration::days(plan.trial_days as i64)),
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .subscription_repository
            .create_subscription(&subscription)
            .await
            .context("DB insert failed")?;

        info!(
            "User {} subscribed to plan '{}' via {} ({})",
            user_id, plan.name, created.provider, created.status
        );
        Ok(created)
    }

    pub async fn current_subscription(
        &self,
        user_id: ObjectId,
        messages: &Messages,
    ) -> Result<Option<UserSubscription>> {
        self.subscription_repository
            .find_current_for_user(user_id)
            .await
            .map_err(|e| {
                anyhow!(messages.get_str(
                    Namespace::Subscription,
                    "fetch.error",
                    "Error fetching subscription",
                ))
                .context(format!("Error fetching subscription: {}", e))
            })
    }

    /// The subscription gate used by premium endpoints.
    pub async fn has_active_access(&self, user_id: ObjectId) -> Result<bool> {
        let current = self
            .subscription_repository
            .find_current_for_user(user_id)
            .await
            .context("Error checking subscription access")?;
        Ok(current.map(|sub| sub.grants_access()).unwrap_or(false))
    }

    pub async fn apply_event(
        &self,
        subscription: &UserSubscription,
        event: SubscriptionEvent,
        messages: &Messages,
    ) -> Result<UserSubscription> {
        let id = subscription._id.ok_or_else(|| {
            anyhow!("Subscription for user {} has no id", subscription.user_id)
        })?;

        match transition(subscription.status, event) {
            Transition::NoOp => Ok(subscription.clone()),
            Transition::Rejected => {
                warn!(
                    "Rejected subscription transition {:?} from {} for {}",
                    event, subscription.status, id
                );
                Err(anyhow!(messages.get_str(
                    Namespace::Subscription,
                    "transition.rejected",
                    "This subscription cannot make that change",
                )))
            }
            Transition::Changed(next) => {
                let cancelled_at =
                    (next == SubscriptionStatus::Cancelled).then(Utc::now);
                self.subscription_repository
                    .update_status(id, next, cancelled_at)
                    .await
                    .context("Error updating subscription status")?;

                info!(
                    "Subscription {} moved {} -> {} ({:?})",
                    id, subscription.status, next, event
                );

                let mut updated = subscription.clone();
                updated.status = next;
                updated.cancelled_at = cancelled_at.or(subscription.cancelled_at);
                Ok(updated)
            }
        }
    }

    /// Loads the caller's subscription and its plan for a provider checkout.
    /// Ownership is enforced here so handlers cannot pay for someone else's
    /// subscription id.
    pub async fn checkout_context(
        &self,
        user_id: ObjectId,
        subscription_id: ObjectId,
        messages: &Messages,
    ) -> Result<(UserSubscription, Plan)> {
        let subscription = self
            .subscription_repository
            .find_subscription_by_id(subscription_id)
            .await
            .context("Error fetching subscription")?
            .filter(|sub| sub.user_id == user_id)
            .ok_or_else(|| {
                anyhow!(messages.get_str(
                    Namespace::Subscription,
                    "fetch.not_found",
                    "No current subscription",
                ))
            })?;

        let plan = self
            .plan_repository
            .find_plan_by_id(subscription.plan_id)
            .await
            .context("Error fetching plan")?
            .ok_or_else(|| {
                anyhow!(messages.get_str(
                    Namespace::Subscription,
                    "plan.not_found",
                    "Plan not found",
                ))
            })?;

        Ok((subscription, plan))
    }

    /// Stores the provider's reference so later webhooks can find the
    /// subscription again.
    pub async fn attach_provider_reference(
        &self,
        subscription_id: ObjectId,
        provider_reference: &str,
    ) -> Result<()> {
        self.subscription_repository
            .set_provider_id(subscription_id, provider_reference)
            .await
            .context("Error storing provider reference")
    }

    /// Applies a user-initiated event to the caller's current subscription.
    pub async fn apply_user_event(
        &self,
        user_id: ObjectId,
        event: SubscriptionEvent,
        messages: &Messages,
    ) -> Result<UserSubscription> {
        let subscription = self
            .current_subscription(user_id, messages)
            .await?
            .ok_or_else(|| {
                anyhow!(messages.get_str(
                    Namespace::Subscription,
                    "fetch.not_found",
                    "No current subscription",
                ))
            })?;

        self.apply_event(&subscription, event, messages).await
    }

    /// Second-chance webhook resolution by the subscription id the provider
    /// echoes back from checkout.
    async fn resolve_echoed_reference(
        &self,
        provider_event: &ProviderEvent,
    ) -> Result<Option<UserSubscription>> {
        let Some(reference) = &provider_event.internal_reference else {
            return Ok(None);
        };
        let Ok(id) = ObjectId::parse_str(reference) else {
            return Ok(None);
        };
        self.subscription_repository
            .find_subscription_by_id(id)
            .await
            .context("Error resolving echoed subscription id")
    }

    /// Webhook entry point: resolves the subscription the event refers to
    /// and applies it. Unknown ids and replayed events are logged and
    /// swallowed so providers do not retry forever.
    pub async fn apply_provider_event(
        &self,
        provider: PaymentProvider,
        provider_event: &ProviderEvent,
        messages: &Messages,
    ) -> Result<()> {
        let event = provider_event.event;

        let resolved = match self
            .subscription_repository
            .find_by_provider_id(&provider_event.reference)
            .await
            .context("Error resolving provider subscription id")?
        {
            Some(subscription) => Some(subscription),
            None => self.resolve_echoed_reference(provider_event).await?,
        };

        let Some(subscription) = resolved else {
            warn!(
                "{} webhook for unknown subscription '{}' ({:?})",
                provider, provider_event.reference, event
            );
            return Ok(());
        };

        let id = subscription._id.context("Subscription without id")?;

        // Activation payloads carry the id the provider's later lifecycle
        // events use; store it over the checkout reference.
        if let Some(durable) = &provider_event.durable_reference {
            if subscription.provider_subscription_id.as_deref() != Some(durable) {
                self.subscription_repository
                    .set_provider_id(id, durable)
                    .await
                    .context("Error storing durable provider reference")?;
            }
        }

        // Activation also refreshes the billing period from the plan.
        if event == SubscriptionEvent::Activated {
            if let Some(plan) = self
                .plan_repository
                .find_plan_by_id(subscription.plan_id)
                .await
                .context("Error fetching plan for activation")?
            {
                let now = Utc::now();
                self.subscription_repository
                    .set_period(id, now, now + Duration::days(plan.billing_cycle.period_days()))
                    .await
                    .context("Error refreshing billing period")?;
            }
        }

        match self.apply_event(&subscription, event, messages).await {
            Ok(_) => Ok(()),
            Err(err) => {
                warn!(
                    "{} webhook event {:?} not applied to {}: {}",
                    provider, event, provider_event.reference, err
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SubscriptionEvent as E;
    use SubscriptionStatus as S;

    #[test]
    fn pending_activates() {
        assert_eq!(transition(S::Pending, E::Activated), Transition::Changed(S::Active));
    }

    #[test]
    fn trial_converts_to_active() {
        assert_eq!(transition(S::Trial, E::Activated), Transition::Changed(S::Active));
    }

    #[test]
    fn activation_is_idempotent() {
        assert_eq!(transition(S::Active, E::Activated), Transition::NoOp);
    }

    #[test]
    fn every_live_status_can_cancel() {
        for status in [S::Pending, S::Trial, S::Active, S::Paused] {
            assert_eq!(transition(status, E::Cancelled), Transition::Changed(S::Cancelled));
        }
    }

    #[test]
    fn cancelled_is_terminal() {
        for event in [E::Activated, E::PaymentFailed, E::Paused, E::Resumed] {
            assert_eq!(transition(S::Cancelled, event), Transition::Rejected);
        }
        assert_eq!(transition(S::Cancelled, E::Cancelled), Transition::NoOp);
    }

    #[test]
    fn expired_is_terminal() {
        for event in [E::Activated, E::Cancelled, E::Paused, E::Resumed] {
            assert_eq!(transition(S::Expired, event), Transition::Rejected);
        }
        assert_eq!(transition(S::Expired, E::PaymentFailed), Transition::NoOp);
    }

    #[test]
    fn only_active_can_pause() {
        assert_eq!(transition(S::Active, E::Paused), Transition::Changed(S::Paused));
        assert_eq!(transition(S::Trial, E::Paused), Transition::Rejected);
        assert_eq!(transition(S::Pending, E::Paused), Transition::Rejected);
    }

    #[test]
    fn paused_resumes_to_active() {
        assert_eq!(transition(S::Paused, E::Resumed), Transition::Changed(S::Active));
    }

    #[test]
    fn payment_failure_expires_live_subscriptions() {
        for status in [S::Trial, S::Active, S::Paused] {
            assert_eq!(transition(status, E::PaymentFailed), Transition::Changed(S::Expired));
        }
        assert_eq!(transition(S::Pending, E::PaymentFailed), Transition::Rejected);
    }
}
