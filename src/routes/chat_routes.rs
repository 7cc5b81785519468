use actix_web::web;
use std::sync::Arc;

use crate::{
    config::cors::configure_cors,
    handlers::chat_handler::{
        clear_history_handler, get_history_handler, send_message_handler,
    },
    services::{chat_service::ChatService, subscription_service::SubscriptionService},
};

pub fn configure_chat_routes(
    cfg: &mut web::ServiceConfig,
    chat_service_data: web::Data<Arc<ChatService>>,
    subscription_service_data: web::Data<Arc<SubscriptionService>>,
) {
    cfg.service(
        web::scope("/chat")
            .wrap(configure_cors())
            .app_data(chat_service_data)
            .app_data(subscription_service_data)
            .route("", web::post().to(send_message_handler))
            .route("", web::get().to(get_history_handler))
            .route("", web::delete().to(clear_history_handler)),
    );
}
