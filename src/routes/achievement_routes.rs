use actix_web::web;
use std::sync::Arc;

use crate::{
    config::cors::configure_cors,
    handlers::achievement_handler::{
        create_achievement_handler, get_all_achievements_handler, get_my_achievements_handler,
    },
    services::achievement_service::AchievementService,
};

pub fn configure_achievement_routes(
    cfg: &mut web::ServiceConfig,
    achievement_service_data: web::Data<Arc<AchievementService>>,
) {
    cfg.service(
        web::scope("/achievements")
            .wrap(configure_cors())
            .app_data(achievement_service_data)
            .route("", web::post().to(create_achievement_handler))
            .route("", web::get().to(get_all_achievements_handler))
            .route("/me", web::get().to(get_my_achievements_handler)),
    );
}
