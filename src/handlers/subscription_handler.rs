use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::{
    middleware::auth::{AuthenticatedUser, require_admin},
    services::subscription_service::{SubscriptionEvent, SubscriptionService},
    types::{
        requests::subscription::{
            create_plan_request::CreatePlanRequest, subscribe_request::SubscribeRequest,
        },
        responses::{api_response::ApiResponse, subscription_view::SubscriptionView},
    },
    utils::{
        locale_utils::{Messages, Namespace, get_lang},
        validation_utils::{handle_bad_request, handle_internal_error, handle_not_found},
    },
};

pub async fn create_plan_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    subscription_service: web::Data<Arc<SubscriptionService>>,
    body: web::Json<CreatePlanRequest>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    if let Err(resp) = require_admin(&auth) {
        return resp;
    }

    match subscription_service
        .create_plan(body.into_inner(), &messages)
        .await
    {
        Ok(plan) => HttpResponse::Created().json(ApiResponse::success(
            messages.get_str(Namespace::Subscription, "plan.create_success", "Plan created"),
            plan,
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn get_plans_handler(
    req: HttpRequest,
    subscription_service: web::Data<Arc<SubscriptionService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match subscription_service.get_active_plans(&messages).await {
        Ok(plans) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::Subscription, "plan.fetch_success", "Plans fetched"),
            plans,
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn subscribe_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    subscription_service: web::Data<Arc<SubscriptionService>>,
    body: web::Json<SubscribeRequest>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let Some(user_id) = auth.user_id() else {
        return handle_internal_error("Authenticated user has no id");
    };

    match subscription_service
        .subscribe(user_id, body.into_inner(), &messages)
        .await
    {
        Ok(subscription) => HttpResponse::Created().json(ApiResponse::success(
            messages.get_str(
                Namespace::Subscription,
                "subscribe.success",
                "Subscription created",
            ),
            SubscriptionView::from(subscription),
        )),
        Err(err) => handle_bad_request(err.to_string()),
    }
}

pub async fn get_my_subscription_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    subscription_service: web::Data<Arc<SubscriptionService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let Some(user_id) = auth.user_id() else {
        return handle_internal_error("Authenticated user has no id");
    };

    match subscription_service
        .current_subscription(user_id, &messages)
        .await
    {
        Ok(Some(subscription)) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(
                Namespace::Subscription,
                "fetch.success",
                "Subscription fetched",
            ),
            SubscriptionView::from(subscription),
        )),
        Ok(None) => handle_not_found(messages.get_str(
            Namespace::Subscription,
            "fetch.not_found",
            "No current subscription",
        )),
        Err(err) => handle_internal_error(err),
    }
}

async fn apply_user_event(
    req: HttpRequest,
    auth: AuthenticatedUser,
    subscription_service: web::Data<Arc<SubscriptionService>>,
    event: SubscriptionEvent,
    success_key: &str,
    success_fallback: &str,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let Some(user_id) = auth.user_id() else {
        return handle_internal_error("Authenticated user has no id");
    };

    match subscription_service
        .apply_user_event(user_id, event, &messages)
        .await
    {
        Ok(subscription) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::Subscription, success_key, success_fallback),
            SubscriptionView::from(subscription),
        )),
        Err(err) => handle_bad_request(err.to_string()),
    }
}

pub async fn cancel_subscription_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    subscription_service: web::Data<Arc<SubscriptionService>>,
) -> HttpResponse {
    apply_user_event(
        req,
        auth,
        subscription_service,
        SubscriptionEvent::Cancelled,
        "cancel.success",
        "Subscription cancelled",
    )
    .await
}

pub async fn pause_subscription_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    subscription_service: web::Data<Arc<SubscriptionService>>,
) -> HttpResponse {
    apply_user_event(
        req,
        auth,
        subscription_service,
        SubscriptionEvent::Paused,
        "pause.success",
        "Subscription paused",
    )
    .await
}

pub async fn resume_subscription_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    subscription_service: web::Data<Arc<SubscriptionService>>,
) -> HttpResponse {
    apply_user_event(
        req,
        auth,
        subscription_service,
        SubscriptionEvent::Resumed,
        "resume.success",
        "Subscription resumed",
    )
    .await
}
