use actix_web::web;
use std::sync::Arc;

use crate::{
    config::cors::configure_cors,
    handlers::{
        paypal_handler::{create_order_handler, paypal_webhook_handler},
        stripe_handler::{create_checkout_handler, stripe_webhook_handler},
    },
    services::{
        paypal_service::PaypalService, stripe_service::StripeService,
        subscription_service::SubscriptionService,
    },
};

pub fn configure_payment_routes(
    cfg: &mut web::ServiceConfig,
    stripe_service_data: web::Data<Arc<StripeService>>,
    paypal_service_data: web::Data<Arc<PaypalService>>,
    subscription_service_data: web::Data<Arc<SubscriptionService>>,
) {
    cfg.service(
        web::scope("/payments")
            .wrap(configure_cors())
            .app_data(stripe_service_data)
            .app_data(paypal_service_data)
            .app_data(subscription_service_data)
            .route("/stripe/checkout", web::post().to(create_checkout_handler))
            .route("/stripe/webhook", web::post().to(stripe_webhook_handler))
            .route("/paypal/order", web::post().to(create_order_handler))
            .route("/paypal/webhook", web::post().to(paypal_webhook_handler)),
    );
}
