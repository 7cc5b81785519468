use crate::{
    constants::COOKIE_NAME,
    models::user_model::User,
    repositories::user_repository::UserRepository,
    types::{
        models::user::role::Role,
        responses::api_response::{ApiResponse, ErrorDetails},
    },
    utils::auth_utils::{Claims, validate_jwt},
};
use actix_web::{
    Error, FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError, web,
};
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;

/// The verified caller, resolved from the JWT cookie (or a bearer header)
/// and loaded from the users collection. Extracting it is the equivalent of
/// the original token-verification middleware.
pub struct AuthenticatedUser {
    pub user: User,
    pub claims: Claims,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> Option<bson::oid::ObjectId> {
        self.user._id
    }

    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }
}

fn unauthorized(message: &str) -> Error {
    let response = HttpResponse::Unauthorized().json(ApiResponse::<()>::error(
        message,
        ErrorDetails { details: None },
    ));
    InternalError::from_response(message.to_string(), response).into()
}

fn extract_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(&COOKIE_NAME) {
        return Some(cookie.value().to_string());
    }
    req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let token = extract_token(&req).ok_or_else(|| unauthorized("Missing credentials"))?;

            let claims =
                validate_jwt(&token).map_err(|_| unauthorized("Invalid or expired token"))?;

            let user_repository = req
                .app_data::<web::Data<Arc<UserRepository>>>()
                .ok_or_else(|| unauthorized("Authentication is not configured"))?;

            let user = user_repository
                .find_user("email", &claims.sub)
                .await
                .map_err(|_| unauthorized("Failed to resolve user"))?
                .ok_or_else(|| unauthorized("Unknown user"))?;

            Ok(AuthenticatedUser { user, claims })
        })
    }
}

/// Admin gate for management endpoints.
pub fn require_admin(auth: &AuthenticatedUser) -> Result<(), HttpResponse> {
    if auth.is_admin() {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
            "Admin access required",
            ErrorDetails { details: None },
        )))
    }
}
