use crate::{
    constants::{
        CHECKOUT_CANCEL_URL, CHECKOUT_SUCCESS_URL, STRIPE_API_BASE, STRIPE_SECRET_KEY,
        STRIPE_WEBHOOK_SECRET,
    },
    models::{plan_model::Plan, subscription_model::UserSubscription},
    services::subscription_service::{ProviderEvent, SubscriptionEvent},
};
use anyhow::{Context, Result, anyhow};
use hmac::{Hmac, Mac};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;

static HTTP: Lazy<Client> = Lazy::new(Client::new);

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Thin REST wrapper over Stripe Checkout. All lifecycle correctness lives
/// in `SubscriptionService`; this module only creates sessions and verifies
/// webhook signatures.
pub struct StripeService;

impl StripeService {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_checkout_session(
        &self,
        subscription: &UserSubscription,
        plan: &Plan,
    ) -> Result<CheckoutSession> {
        let price = plan.price_cents.to_string();
        let interval = match plan.billing_cycle {
            crate::types::models::subscription::billing_cycle::BillingCycle::Monthly => "month",
            crate::types::models::subscription::billing_cycle::BillingCycle::Yearly => "year",
        };
        let subscription_id = subscription
            ._id
            .map(|id| id.to_hex())
            .context("Subscription without id")?;

        let params = [
            ("mode", "subscription"),
            ("success_url", CHECKOUT_SUCCESS_URL.as_str()),
            ("cancel_url", CHECKOUT_CANCEL_URL.as_str()),
            ("line_items[0][quantity]", "1"),
            ("line_items[0][price_data][currency]", plan.currency.as_str()),
            ("line_items[0][price_data][unit_amount]", price.as_str()),
            ("line_items[0][price_data][product_data][name]", plan.name.as_str()),
            ("line_items[0][price_data][recurring][interval]", interval),
            ("client_reference_id", subscription_id.as_str()),
        ];

        let response = HTTP
            .post(format!("{}/v1/checkout/sessions", STRIPE_API_BASE))
            .bearer_auth(STRIPE_SECRET_KEY.as_str())
            .form(&params)
            .send()
            .await
            .context("Stripe checkout request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Stripe returned {}: {}", status, body));
        }

        response
            .json::<CheckoutSession>()
            .await
            .context("Stripe checkout response was not valid JSON")
    }

    pub fn verify_webhook_signature(&self, payload: &[u8], signature_header: &str) -> bool {
        verify_signature(payload, signature_header, &STRIPE_WEBHOOK_SECRET)
    }

    /// Maps a Stripe event to our lifecycle vocabulary, or `None` for event
    /// types we ignore.
    pub fn parse_event(&self, event: &Value) -> Option<ProviderEvent> {
        let object = event.get("data")?.get("object")?;
        let kind = event.get("type")?.as_str()?;

        let field = |name: &str| {
            object
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let mapped = match kind {
            "checkout.session.completed" => SubscriptionEvent::Activated,
            "customer.subscription.deleted" => SubscriptionEvent::Cancelled,
            "customer.subscription.paused" => SubscriptionEvent::Paused,
            "customer.subscription.resumed" => SubscriptionEvent::Resumed,
            "invoice.payment_failed" => SubscriptionEvent::PaymentFailed,
            _ => return None,
        };

        // Checkout sessions are matched by the stored session id and carry
        // the `sub_...` id all later subscription and invoice events use.
        match kind {
            "checkout.session.completed" => Some(ProviderEvent {
                event: mapped,
                reference: field("id")?,
                internal_reference: field("client_reference_id"),
                durable_reference: field("subscription"),
            }),
            "invoice.payment_failed" => Some(ProviderEvent {
                event: mapped,
                reference: field("subscription")?,
                internal_reference: None,
                durable_reference: None,
            }),
            _ => Some(ProviderEvent {
                event: mapped,
                reference: field("id")?,
                internal_reference: None,
                durable_reference: None,
            }),
        }
    }
}

/// Stripe's `Stripe-Signature` scheme: `t=<ts>,v1=<hex hmac>` where the MAC
/// covers `"{t}.{raw_body}"`.
pub fn verify_signature(payload: &[u8], signature_header: &str, secret: &str) -> bool {
    let mut timestamp = None;
    let mut provided = None;

    for part in signature_header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => provided = Some(value),
            _ => {}
        }
    }

    let (Some(timestamp), Some(provided)) = (timestamp, provided) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);

    let expected = hex_digest(&mac.finalize().into_bytes());
    expected == provided
}

fn hex_digest(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sign(payload: &[u8], timestamp: &str, secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        format!("t={},v1={}", timestamp, hex_digest(&mac.finalize().into_bytes()))
    }

    #[test]
    fn accepts_a_correctly_signed_payload() {
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let header = sign(payload, "1700000000", "whsec_test");
        assert!(verify_signature(payload, &header, "whsec_test"));
    }

    #[test]
    fn rejects_a_tampered_payload() {
        let header = sign(b"original", "1700000000", "whsec_test");
        assert!(!verify_signature(b"tampered", &header, "whsec_test"));
    }

    #[test]
    fn rejects_the_wrong_secret() {
        let payload = b"payload";
        let header = sign(payload, "1700000000", "whsec_test");
        assert!(!verify_signature(payload, &header, "whsec_other"));
    }

    #[test]
    fn rejects_a_malformed_header() {
        assert!(!verify_signature(b"payload", "v1=deadbeef", "whsec_test"));
        assert!(!verify_signature(b"payload", "", "whsec_test"));
    }

    #[test]
    fn maps_checkout_completion_to_activation() {
        let service = StripeService::new();
        let event = json!({
            "type": "checkout.session.completed",
            "data": { "object": {
                "id": "cs_test_123",
                "subscription": "sub_123",
                "client_reference_id": "665f1f77bcf86cd799439011"
            } }
        });
        let parsed = service.parse_event(&event).unwrap();
        assert_eq!(parsed.event, SubscriptionEvent::Activated);
        assert_eq!(parsed.reference, "cs_test_123");
        assert_eq!(parsed.durable_reference.as_deref(), Some("sub_123"));
        assert_eq!(
            parsed.internal_reference.as_deref(),
            Some("665f1f77bcf86cd799439011")
        );
    }

    #[test]
    fn maps_subscription_deletion_to_cancellation() {
        let service = StripeService::new();
        let event = json!({
            "type": "customer.subscription.deleted",
            "data": { "object": { "id": "sub_123" } }
        });
        let parsed = service.parse_event(&event).unwrap();
        assert_eq!(parsed.event, SubscriptionEvent::Cancelled);
        assert_eq!(parsed.reference, "sub_123");
        assert_eq!(parsed.durable_reference, None);
    }

    #[test]
    fn payment_failure_is_matched_by_the_invoice_subscription() {
        let service = StripeService::new();
        let event = json!({
            "type": "invoice.payment_failed",
            "data": { "object": { "id": "in_123", "subscription": "sub_123" } }
        });
        let parsed = service.parse_event(&event).unwrap();
        assert_eq!(parsed.event, SubscriptionEvent::PaymentFailed);
        assert_eq!(parsed.reference, "sub_123");
    }

    #[test]
    fn lifecycle_events_resolve_by_the_id_activation_stores() {
        let service = StripeService::new();
        let completed = json!({
            "type": "checkout.session.completed",
            "data": { "object": { "id": "cs_test_abc", "subscription": "sub_999" } }
        });
        let deleted = json!({
            "type": "customer.subscription.deleted",
            "data": { "object": { "id": "sub_999" } }
        });
        let failed = json!({
            "type": "invoice.payment_failed",
            "data": { "object": { "id": "in_1", "subscription": "sub_999" } }
        });

        let stored = service
            .parse_event(&completed)
            .unwrap()
            .durable_reference
            .unwrap();
        assert_eq!(service.parse_event(&deleted).unwrap().reference, stored);
        assert_eq!(service.parse_event(&failed).unwrap().reference, stored);
    }

    #[test]
    fn unknown_event_types_are_ignored() {
        let service = StripeService::new();
        let event = json!({
            "type": "charge.refunded",
            "data": { "object": { "id": "ch_123" } }
        });
        assert_eq!(service.parse_event(&event), None);
    }
}
