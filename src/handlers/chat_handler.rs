use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::{
    middleware::{auth::AuthenticatedUser, subscription::require_subscriber},
    services::{chat_service::ChatService, subscription_service::SubscriptionService},
    types::{
        requests::chat::chat_request::ChatRequest, responses::api_response::ApiResponse,
    },
    utils::{
        locale_utils::{Messages, Namespace, get_lang},
        validation_utils::{handle_bad_request, handle_internal_error},
    },
};

/// Sends a message to the tutor assistant. Subscriber-only.
pub async fn send_message_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    chat_service: web::Data<Arc<ChatService>>,
    subscription_service: web::Data<Arc<SubscriptionService>>,
    body: web::Json<ChatRequest>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let Some(user_id) = auth.user_id() else {
        return handle_internal_error("Authenticated user has no id");
    };

    if let Err(resp) = require_subscriber(&subscription_service, user_id, &messages).await {
        return resp;
    }

    let message = body.into_inner().message;
    if message.trim().is_empty() {
        return handle_bad_request(messages.get_str(
            Namespace::Chat,
            "message.empty",
            "Message cannot be empty",
        ));
    }

    match chat_service.send_message(user_id, message, &messages).await {
        Ok(reply) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::Chat, "message.sent", "Message sent"),
            reply,
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn get_history_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    chat_service: web::Data<Arc<ChatService>>,
    subscription_service: web::Data<Arc<SubscriptionService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let Some(user_id) = auth.user_id() else {
        return handle_internal_error("Authenticated user has no id");
    };

    if let Err(resp) = require_subscriber(&subscription_service, user_id, &messages).await {
        return resp;
    }

    match chat_service.get_history(user_id).await {
        Ok(chat) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::Chat, "history.fetched", "History fetched"),
            chat,
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn clear_history_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    chat_service: web::Data<Arc<ChatService>>,
    subscription_service: web::Data<Arc<SubscriptionService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let Some(user_id) = auth.user_id() else {
        return handle_internal_error("Authenticated user has no id");
    };

    if let Err(resp) = require_subscriber(&subscription_service, user_id, &messages).await {
        return resp;
    }

    match chat_service.clear_history(user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::Chat, "history.cleared", "History cleared"),
            None::<()>,
        )),
        Err(err) => handle_internal_error(err),
    }
}
