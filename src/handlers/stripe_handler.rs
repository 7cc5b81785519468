use actix_web::{HttpRequest, HttpResponse, web};
use log::warn;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{
    middleware::auth::AuthenticatedUser,
    services::{stripe_service::StripeService, subscription_service::SubscriptionService},
    types::{
        models::subscription::provider::PaymentProvider,
        requests::payment::checkout_request::CheckoutRequest,
        responses::api_response::ApiResponse,
    },
    utils::{
        locale_utils::{Messages, Namespace, get_lang},
        validation_utils::{handle_bad_request, handle_internal_error, parse_object_id},
    },
};

/// Creates a Stripe Checkout session for a pending subscription and returns
/// the redirect URL. The session id is stored so the completion webhook can
/// resolve the subscription.
pub async fn create_checkout_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    stripe_service: web::Data<Arc<StripeService>>,
    subscription_service: web::Data<Arc<SubscriptionService>>,
    body: web::Json<CheckoutRequest>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let invalid_id = messages.get_str(
        Namespace::Subscription,
        "invalid_id",
        "Invalid subscription id",
    );
    let subscription_id = match parse_object_id(&body.subscription_id, &invalid_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let Some(user_id) = auth.user_id() else {
        return handle_internal_error("Authenticated user has no id");
    };

    let (subscription, plan) = match subscription_service
        .checkout_context(user_id, subscription_id, &messages)
        .await
    {
        Ok(context) => context,
        Err(err) => return handle_bad_request(err.to_string()),
    };

    let session = match stripe_service
        .create_checkout_session(&subscription, &plan)
        .await
    {
        Ok(session) => session,
        Err(err) => return handle_internal_error(err),
    };

    if let Err(err) = subscription_service
        .attach_provider_reference(subscription_id, &session.id)
        .await
    {
        return handle_internal_error(err);
    }

    HttpResponse::Ok().json(ApiResponse::success(
        messages.get_str(
            Namespace::Subscription,
            "checkout.created",
            "Checkout session created",
        ),
        json!({ "checkout_url": session.url }),
    ))
}

/// Stripe webhook sink. The body must stay raw bytes: the signature covers
/// the exact payload Stripe sent.
pub async fn stripe_webhook_handler(
    req: HttpRequest,
    payload: web::Bytes,
    stripe_service: web::Data<Arc<StripeService>>,
    subscription_service: web::Data<Arc<SubscriptionService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let signature = req
        .headers()
        .get("Stripe-Signature")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !stripe_service.verify_webhook_signature(&payload, signature) {
        warn!("Rejected Stripe webhook with a bad signature");
        return handle_bad_request("Invalid webhook signature");
    }

    let event: Value = match serde_json::from_slice(&payload) {
        Ok(event) => event,
        Err(_) => return handle_bad_request("Invalid webhook payload"),
    };

    // Unknown event types are acknowledged so Stripe stops retrying them.
    if let Some(provider_event) = stripe_service.parse_event(&event) {
        if let Err(err) = subscription_service
            .apply_provider_event(PaymentProvider::Stripe, &provider_event, &messages)
            .await
        {
            return handle_internal_error(err);
        }
    }

    HttpResponse::Ok().json(ApiResponse::success("received", None::<()>))
}
