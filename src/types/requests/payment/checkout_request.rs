use serde::Deserialize;

/// Starts a provider checkout for an existing `pending` subscription.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub subscription_id: String,
}
