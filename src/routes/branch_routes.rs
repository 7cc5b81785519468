use actix_web::web;
use std::sync::Arc;

use crate::{
    config::cors::configure_cors,
    handlers::branch_handler::{
        create_branch_handler, delete_branch_handler, get_all_branches_handler,
        get_branch_handler, update_branch_handler,
    },
    services::branch_service::BranchService,
};

pub fn configure_branch_routes(
    cfg: &mut web::ServiceConfig,
    branch_service_data: web::Data<Arc<BranchService>>,
) {
    cfg.service(
        web::scope("/branches")
            .wrap(configure_cors())
            .app_data(branch_service_data)
            .route("", web::post().to(create_branch_handler))
            .route("", web::get().to(get_all_branches_handler))
            .route("/{id}", web::get().to(get_branch_handler))
            .route("/{id}", web::put().to(update_branch_handler))
            .route("/{id}", web::delete().to(delete_branch_handler)),
    );
}
