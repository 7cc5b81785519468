use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::{
    middleware::auth::{AuthenticatedUser, require_admin},
    services::branch_service::BranchService,
    types::{
        requests::branch::{
            create_branch_request::CreateBranchRequest,
            update_branch_request::UpdateBranchRequest,
        },
        responses::api_response::ApiResponse,
    },
    utils::{
        locale_utils::{Messages, Namespace, get_lang},
        validation_utils::{handle_internal_error, handle_not_found, parse_object_id},
    },
};

pub async fn create_branch_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    branch_service: web::Data<Arc<BranchService>>,
    body: web::Json<CreateBranchRequest>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    if let Err(resp) = require_admin(&auth) {
        return resp;
    }

    match branch_service
        .create_branch(body.into_inner(), &messages)
        .await
    {
        Ok(branch) => HttpResponse::Created().json(ApiResponse::success(
            messages.get_str(Namespace::Quiz, "branch.create_success", "Branch created"),
            branch,
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn get_all_branches_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    branch_service: web::Data<Arc<BranchService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    // Admins also see deactivated branches.
    let active_only = !auth.is_admin();

    match branch_service.get_all_branches(active_only, &messages).await {
        Ok(branches) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::Quiz, "branch.fetch_success", "Branches fetched"),
            branches,
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn get_branch_handler(
    req: HttpRequest,
    _auth: AuthenticatedUser,
    path: web::Path<String>,
    branch_service: web::Data<Arc<BranchService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));
    let invalid_id = messages.get_str(Namespace::Quiz, "branch.invalid_id", "Invalid branch id");

    let branch_id = match parse_object_id(&path.into_inner(), &invalid_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match branch_service.get_branch(branch_id, &messages).await {
        Ok(Some(branch)) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::Quiz, "branch.fetch_success", "Branch fetched"),
            branch,
        )),
        Ok(None) => handle_not_found(messages.get_str(
            Namespace::Quiz,
            "branch.not_found",
            "Branch not found",
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn update_branch_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<UpdateBranchRequest>,
    branch_service: web::Data<Arc<BranchService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    if let Err(resp) = require_admin(&auth) {
        return resp;
    }

    let invalid_id = messages.get_str(Namespace::Quiz, "branch.invalid_id", "Invalid branch id");
    let branch_id = match parse_object_id(&path.into_inner(), &invalid_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match branch_service
        .update_branch(branch_id, body.into_inner(), &messages)
        .await
    {
        Ok(Some(branch)) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::Quiz, "branch.update_success", "Branch updated"),
            branch,
        )),
        Ok(None) => handle_not_found(messages.get_str(
            Namespace::Quiz,
            "branch.not_found",
            "Branch not found",
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn delete_branch_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    branch_service: web::Data<Arc<BranchService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    if let Err(resp) = require_admin(&auth) {
        return resp;
    }

    let invalid_id = messages.get_str(Namespace::Quiz, "branch.invalid_id", "Invalid branch id");
    let branch_id = match parse_object_id(&path.into_inner(), &invalid_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match branch_service.delete_branch(branch_id, &messages).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::Quiz, "branch.delete_success", "Branch deleted"),
            None::<()>,
        )),
        Err(err) => handle_internal_error(err),
    }
}
