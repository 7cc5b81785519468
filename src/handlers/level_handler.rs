use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::{
    middleware::auth::AuthenticatedUser,
    services::progression_service::ProgressionService,
    types::responses::api_response::ApiResponse,
    utils::{
        locale_utils::{Messages, Namespace, get_lang},
        validation_utils::{handle_internal_error, parse_object_id},
    },
};

pub async fn get_my_progress_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    progression_service: web::Data<Arc<ProgressionService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let Some(user_id) = auth.user_id() else {
        return handle_internal_error("Authenticated user has no id");
    };

    match progression_service
        .get_all_progress(user_id, &messages)
        .await
    {
        Ok(levels) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::Quiz, "level.fetch_success", "Progress fetched"),
            levels,
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn get_branch_progress_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    progression_service: web::Data<Arc<ProgressionService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let invalid_id = messages.get_str(Namespace::Quiz, "branch.invalid_id", "Invalid branch id");
    let branch_id = match parse_object_id(&path.into_inner(), &invalid_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let Some(user_id) = auth.user_id() else {
        return handle_internal_error("Authenticated user has no id");
    };

    match progression_service
        .get_branch_progress(user_id, branch_id, &messages)
        .await
    {
        Ok(level) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::Quiz, "level.fetch_success", "Progress fetched"),
            level,
        )),
        Err(err) => handle_internal_error(err),
    }
}
