use actix_web::{HttpRequest, HttpResponse, web};
use log::warn;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{
    middleware::auth::AuthenticatedUser,
    services::{paypal_service::PaypalService, subscription_service::SubscriptionService},
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

/// Creates a PayPal order for a pending subscription and returns the buyer
/// approval URL. The order id is stored so approval webhooks can resolve
/// the subscription.
pub async fn create_order_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    paypal_service: web::Data<Arc<PaypalService>>,
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

    let order = match paypal_service.create_order(&subscription, &plan).await {
        Ok(order) => order,
        Err(err) => return handle_internal_error(err),
    };

    if let Err(err) = subscription_service
        .attach_provider_reference(subscription_id, &order.id)
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
        json!({
            "order_id": order.id,
            "approve_url": order.approve_url(),
        }),
    ))
}

pub async fn paypal_webhook_handler(
    req: HttpRequest,
    event: web::Json<Value>,
    paypal_service: web::Data<Arc<PaypalService>>,
    subscription_service: web::Data<Arc<SubscriptionService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));
    let event = event.into_inner();

    match paypal_service.verify_webhook(req.headers(), &event).await {
        Ok(true) => {}
        Ok(false) => {
            warn!("Rejected PayPal webhook that failed verification");
            return handle_bad_request("Invalid webhook signature");
        }
        Err(err) => return handle_internal_error(err),
    }

    // Unknown event types are acknowledged so PayPal stops retrying them.
    if let Some(provider_event) = paypal_service.parse_event(&event) {
        if let Err(err) = subscription_service
            .apply_provider_event(PaymentProvider::Paypal, &provider_event, &messages)
            .await
        {
            return handle_internal_error(err);
        }
    }

    HttpResponse::Ok().json(ApiResponse::success("received", None::<()>))
}
