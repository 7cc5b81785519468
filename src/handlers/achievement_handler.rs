use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::{
    middleware::auth::{AuthenticatedUser, require_admin},
    models::achievement_model::Achievement,
    services::achievement_service::AchievementService,
    types::responses::api_response::ApiResponse,
    utils::{
        locale_utils::{Messages, Namespace, get_lang},
        validation_utils::handle_internal_error,
    },
};

pub async fn create_achievement_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    achievement_service: web::Data<Arc<AchievementService>>,
    body: web::Json<Achievement>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    if let Err(resp) = require_admin(&auth) {
        return resp;
    }

    match achievement_service
        .create_achievement(body.into_inner(), &messages)
        .await
    {
        Ok(achievement) => HttpResponse::Created().json(ApiResponse::success(
            messages.get_str(
                Namespace::Quiz,
                "achievement.create_success",
                "Achievement created",
            ),
            achievement,
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn get_all_achievements_handler(
    req: HttpRequest,
    _auth: AuthenticatedUser,
    achievement_service: web::Data<Arc<AchievementService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    match achievement_service.get_all_achievements(&messages).await {
        Ok(achievements) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(
                Namespace::Quiz,
                "achievement.fetch_success",
                "Achievements fetched",
            ),
            achievements,
        )),
        Err(err) => handle_internal_error(err),
    }
}

/// Every badge definition plus the caller's progress toward it.
pub async fn get_my_achievements_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    achievement_service: web::Data<Arc<AchievementService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let Some(user_id) = auth.user_id() else {
        return handle_internal_error("Authenticated user has no id");
    };

    match achievement_service
        .get_user_progress(user_id, &messages)
        .await
    {
        Ok(progress) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(
                Namespace::Quiz,
                "achievement.fetch_success",
                "Achievements fetched",
            ),
            progress,
        )),
        Err(err) => handle_internal_error(err),
    }
}
