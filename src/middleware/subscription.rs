use crate::{
    services::subscription_service::SubscriptionService,
    types::responses::api_response::{ApiResponse, ErrorDetails},
    utils::locale_utils::{Messages, Namespace},
};
use actix_web::HttpResponse;
use bson::oid::ObjectId;

/// Subscription gate for premium endpoints. Returns the payment-required
/// response the route should send when the caller has no live subscription.
pub async fn require_subscriber(
    subscription_service: &SubscriptionService,
    user_id: ObjectId,
    messages: &Messages,
) -> Result<(), HttpResponse> {
    match subscription_service.has_active_access(user_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(HttpResponse::PaymentRequired().json(ApiResponse::<()>::error(
            messages.get_str(
                Namespace::Subscription,
                "gate.required",
                "An active subscription is required",
            ),
            ErrorDetails { details: None },
        ))),
        Err(err) => Err(HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
            err.to_string(),
            ErrorDetails { details: None },
        ))),
    }
}
