use crate::{
    constants::{
        CHECKOUT_CANCEL_URL, CHECKOUT_SUCCESS_URL, PAYPAL_API_BASE, PAYPAL_CLIENT_ID,
        PAYPAL_CLIENT_SECRET, PAYPAL_WEBHOOK_ID,
    },
    models::{plan_model::Plan, subscription_model::UserSubscription},
    services::subscription_service::{ProviderEvent, SubscriptionEvent},
};
use anyhow::{Context, Result, anyhow};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

static HTTP: Lazy<Client> = Lazy::new(Client::new);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct PaypalOrder {
    pub id: String,
    #[serde(default)]
    pub links: Vec<PaypalLink>,
}

#[derive(Debug, Deserialize)]
pub struct PaypalLink {
    pub rel: String,
    pub href: String,
}

impl PaypalOrder {
    /// The buyer-facing approval URL, when PayPal included one.
    pub fn approve_url(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == "approve")
            .map(|link| link.href.as_str())
    }
}

pub struct PaypalService;

impl PaypalService {
    pub fn new() -> Self {
        Self
    }

    async fn access_token(&self) -> Result<String> {
        let response = HTTP
            .post(format!("{}/v1/oauth2/token", *PAYPAL_API_BASE))
            .basic_auth(
                PAYPAL_CLIENT_ID.as_str(),
                Some(PAYPAL_CLIENT_SECRET.as_str()),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .context("PayPal token request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("PayPal token endpoint returned {}", response.status()));
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("PayPal token response was not valid JSON")?;
        Ok(token.access_token)
    }

    pub async fn create_order(
        &self,
        subscription: &UserSubscription,
        plan: &Plan,
    ) -> Result<PaypalOrder> {
        let token = self.access_token().await?;
        let subscription_id = subscription
            ._id
            .map(|id| id.to_hex())
            .context("Subscription without id")?;

        let body = json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "reference_id": subscription_id,
                "custom_id": subscription_id,
                "description": plan.name,
                "amount": {
                    "currency_code": plan.currency.to_uppercase(),
                    "value": format!("{}.{:02}", plan.price_cents / 100, plan.price_cents % 100),
                }
            }],
            "application_context": {
                "return_url": CHECKOUT_SUCCESS_URL.as_str(),
                "cancel_url": CHECKOUT_CANCEL_URL.as_str(),
            }
        });

        let response = HTTP
            .post(format!("{}/v2/checkout/orders", *PAYPAL_API_BASE))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .context("PayPal order request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("PayPal returned {}: {}", status, text));
        }

        response
            .json::<PaypalOrder>()
            .await
            .context("PayPal order response was not valid JSON")
    }

    /// PayPal webhooks are verified server-side via the
    /// verify-webhook-signature endpoint rather than a local MAC.
    pub async fn verify_webhook(
        &self,
        headers: &actix_web::http::header::HeaderMap,
        event: &Value,
    ) -> Result<bool> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
        };

        let body = json!({
            "auth_algo": header("paypal-auth-algo"),
            "cert_url": header("paypal-cert-url"),
            "transmission_id": header("paypal-transmission-id"),
            "transmission_sig": header("paypal-transmission-sig"),
            "transmission_time": header("paypal-transmission-time"),
            "webhook_id": PAYPAL_WEBHOOK_ID.as_str(),
            "webhook_event": event,
        });

        let token = self.access_token().await?;
        let response = HTTP
            .post(format!(
                "{}/v1/notifications/verify-webhook-signature",
                *PAYPAL_API_BASE
            ))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .context("PayPal verification request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "PayPal verification endpoint returned {}",
                response.status()
            ));
        }

        let verdict: Value = response
            .json()
            .await
            .context("PayPal verification response was not valid JSON")?;
        Ok(verdict.get("verification_status").and_then(Value::as_str) == Some("SUCCESS"))
    }

    /// Maps a PayPal event to our lifecycle vocabulary, or `None` for event
    /// types we ignore.
    pub fn parse_event(&self, event: &Value) -> Option<ProviderEvent> {
        let kind = event.get("event_type")?.as_str()?;
        let resource = event.get("resource")?;

        let field = |name: &str| {
            resource
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let mapped = match kind {
            "CHECKOUT.ORDER.APPROVED" | "BILLING.SUBSCRIPTION.ACTIVATED" => {
                SubscriptionEvent::Activated
            }
            "BILLING.SUBSCRIPTION.CANCELLED" => SubscriptionEvent::Cancelled,
            "BILLING.SUBSCRIPTION.SUSPENDED" => SubscriptionEvent::Paused,
            "BILLING.SUBSCRIPTION.RE-ACTIVATED" => SubscriptionEvent::Resumed,
            "BILLING.SUBSCRIPTION.PAYMENT.FAILED" | "PAYMENT.SALE.DENIED" => {
                SubscriptionEvent::PaymentFailed
            }
            _ => return None,
        };

        match kind {
            // Approved orders are matched by the stored order id; the
            // echoed reference_id covers orders created before the id was
            // stored.
            "CHECKOUT.ORDER.APPROVED" => Some(ProviderEvent {
                event: mapped,
                reference: field("id")?,
                internal_reference: resource
                    .get("purchase_units")
                    .and_then(|units| units.get(0))
                    .and_then(|unit| unit.get("reference_id"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                durable_reference: None,
            }),
            // Agreement activation carries the durable `I-...` id plus the
            // custom_id set at checkout; store the former so the rest of
            // the BILLING.SUBSCRIPTION family resolves.
            "BILLING.SUBSCRIPTION.ACTIVATED" => Some(ProviderEvent {
                event: mapped,
                reference: field("id")?,
                internal_reference: field("custom_id"),
                durable_reference: field("id"),
            }),
            // Sale resources point at the agreement, not themselves.
            "PAYMENT.SALE.DENIED" => Some(ProviderEvent {
                event: mapped,
                reference: field("billing_agreement_id").or_else(|| field("id"))?,
                internal_reference: field("custom"),
                durable_reference: None,
            }),
            _ => Some(ProviderEvent {
                event: mapped,
                reference: field("id")?,
                internal_reference: field("custom_id"),
                durable_reference: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_approval_activates() {
        let service = PaypalService::new();
        let event = json!({
            "event_type": "CHECKOUT.ORDER.APPROVED",
            "resource": {
                "id": "5O190127TN364715T",
                "purchase_units": [{ "reference_id": "665f1f77bcf86cd799439011" }]
            }
        });
        let parsed = service.parse_event(&event).unwrap();
        assert_eq!(parsed.event, SubscriptionEvent::Activated);
        assert_eq!(parsed.reference, "5O190127TN364715T");
        assert_eq!(
            parsed.internal_reference.as_deref(),
            Some("665f1f77bcf86cd799439011")
        );
    }

    #[test]
    fn subscription_cancellation_maps_to_cancelled() {
        let service = PaypalService::new();
        let event = json!({
            "event_type": "BILLING.SUBSCRIPTION.CANCELLED",
            "resource": { "id": "I-BW452GLLEP1G" }
        });
        let parsed = service.parse_event(&event).unwrap();
        assert_eq!(parsed.event, SubscriptionEvent::Cancelled);
        assert_eq!(parsed.reference, "I-BW452GLLEP1G");
    }

    #[test]
    fn agreement_activation_stores_the_id_later_events_carry() {
        let service = PaypalService::new();
        let activated = json!({
            "event_type": "BILLING.SUBSCRIPTION.ACTIVATED",
            "resource": { "id": "I-BW452GLLEP1G", "custom_id": "665f1f77bcf86cd799439011" }
        });
        let cancelled = json!({
            "event_type": "BILLING.SUBSCRIPTION.CANCELLED",
            "resource": { "id": "I-BW452GLLEP1G" }
        });

        let activation = service.parse_event(&activated).unwrap();
        assert_eq!(activation.durable_reference.as_deref(), Some("I-BW452GLLEP1G"));
        assert_eq!(
            activation.internal_reference.as_deref(),
            Some("665f1f77bcf86cd799439011")
        );
        assert_eq!(
            service.parse_event(&cancelled).unwrap().reference,
            activation.durable_reference.unwrap()
        );
    }

    #[test]
    fn denied_sales_resolve_by_the_billing_agreement() {
        let service = PaypalService::new();
        let event = json!({
            "event_type": "PAYMENT.SALE.DENIED",
            "resource": { "id": "8RS6210181570153L", "billing_agreement_id": "I-BW452GLLEP1G" }
        });
        let parsed = service.parse_event(&event).unwrap();
        assert_eq!(parsed.event, SubscriptionEvent::PaymentFailed);
        assert_eq!(parsed.reference, "I-BW452GLLEP1G");
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let service = PaypalService::new();
        let event = json!({
            "event_type": "CUSTOMER.DISPUTE.CREATED",
            "resource": { "id": "PP-D-1" }
        });
        assert_eq!(service.parse_event(&event), None);
    }

    #[test]
    fn approve_url_picks_the_approve_link() {
        let order = PaypalOrder {
            id: "5O190127TN364715T".into(),
            links: vec![
                PaypalLink {
                    rel: "self".into(),
                    href: "https://api.paypal.com/v2/checkout/orders/5O1".into(),
                },
                PaypalLink {
                    rel: "approve".into(),
                    href: "https://www.paypal.com/checkoutnow?token=5O1".into(),
                },
            ],
        };
        assert_eq!(
            order.approve_url(),
            Some("https://www.paypal.com/checkoutnow?token=5O1")
        );
    }
}
