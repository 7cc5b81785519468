use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::{
    middleware::auth::{AuthenticatedUser, require_admin},
    services::user_service::UserService,
    types::{
        requests::user::update_user_request::UpdateUserRequest,
        responses::api_response::ApiResponse,
    },
    utils::{
        locale_utils::{Messages, Namespace, get_lang},
        validation_utils::{handle_internal_error, handle_not_found},
    },
};

/// Users may read and edit their own record; everything else is admin-only.
fn require_self_or_admin(auth: &AuthenticatedUser, email: &str) -> Result<(), HttpResponse> {
    if auth.user.email == email {
        return Ok(());
    }
    require_admin(auth)
}

pub async fn get_all_users_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    user_service: web::Data<Arc<UserService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    if let Err(resp) = require_admin(&auth) {
        return resp;
    }

    match user_service.get_all_users(&messages).await {
        Ok(users) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::User, "fetch.success", "Users fetched"),
            users,
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn get_user_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    user_service: web::Data<Arc<UserService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));
    let email = path.into_inner();

    if let Err(resp) = require_self_or_admin(&auth, &email) {
        return resp;
    }

    match user_service.get_user(&email, &messages).await {
        Ok(Some(user)) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::User, "fetch.success", "User fetched"),
            user,
        )),
        Ok(None) => handle_not_found(messages.get_str(
            Namespace::User,
            "fetch.not_found",
            "User not found",
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn update_user_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<UpdateUserRequest>,
    user_service: web::Data<Arc<UserService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));
    let email = path.into_inner();

    if let Err(resp) = require_self_or_admin(&auth, &email) {
        return resp;
    }

    match user_service
        .update_user(&email, body.into_inner(), &messages)
        .await
    {
        Ok(updated) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::User, "update.success", "User updated"),
            updated,
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn delete_user_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    user_service: web::Data<Arc<UserService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));
    let email = path.into_inner();

    if let Err(resp) = require_self_or_admin(&auth, &email) {
        return resp;
    }

    match user_service.delete_user(&email, &messages).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::User, "delete.success", "User deleted"),
            None::<()>,
        )),
        Err(err) => handle_internal_error(err),
    }
}
