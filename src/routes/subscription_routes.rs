use actix_web::web;
use std::sync::Arc;

use crate::{
    config::cors::configure_cors,
    handlers::subscription_handler::{
        cancel_subscription_handler, create_plan_handler, get_my_subscription_handler,
        get_plans_handler, pause_subscription_handler, resume_subscription_handler,
        subscribe_handler,
    },
    services::subscription_service::SubscriptionService,
};

pub fn configure_subscription_routes(
    cfg: &mut web::ServiceConfig,
    subscription_service_data: web::Data<Arc<SubscriptionService>>,
) {
    cfg.service(
        web::scope("/subscriptions")
            .wrap(configure_cors())
            .app_data(subscription_service_data)
            .route("/plans", web::post().to(create_plan_handler))
            .route("/plans", web::get().to(get_plans_handler))
            .route("/subscribe", web::post().to(subscribe_handler))
            .route("/me", web::get().to(get_my_subscription_handler))
            .route("/cancel", web::post().to(cancel_subscription_handler))
            .route("/pause", web::post().to(pause_subscription_handler))
            .route("/resume", web::post().to(resume_subscription_handler)),
    );
}
