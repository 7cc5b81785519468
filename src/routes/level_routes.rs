use actix_web::web;
use std::sync::Arc;

use crate::{
    config::cors::configure_cors,
    handlers::level_handler::{get_branch_progress_handler, get_my_progress_handler},
    services::progression_service::ProgressionService,
};

pub fn configure_level_routes(
    cfg: &mut web::ServiceConfig,
    progression_service_data: web::Data<Arc<ProgressionService>>,
) {
    cfg.service(
        web::scope("/levels")
            .wrap(configure_cors())
            .app_data(progression_service_data)
            .route("", web::get().to(get_my_progress_handler))
            .route(
                "/branch/{branch_id}",
                web::get().to(get_branch_progress_handler),
            ),
    );
}
