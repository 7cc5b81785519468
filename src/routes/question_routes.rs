use actix_web::web;
use std::sync::Arc;

use crate::{
    config::cors::configure_cors,
    handlers::question_handler::{
        create_question_handler, delete_question_handler, get_level_questions_handler,
        submit_answer_handler, update_question_handler,
    },
    services::{progression_service::ProgressionService, question_service::QuestionService},
};

pub fn configure_question_routes(
    cfg: &mut web::ServiceConfig,
    question_service_data: web::Data<Arc<QuestionService>>,
    progression_service_data: web::Data<Arc<ProgressionService>>,
) {
    cfg.service(
        web::scope("/questions")
            .wrap(configure_cors())
            .app_data(question_service_data)
            .app_data(progression_service_data)
            .route("", web::post().to(create_question_handler))
            .route(
                "/branch/{branch_id}/level/{level}",
                web::get().to(get_level_questions_handler),
            )
            .route("/{id}", web::put().to(update_question_handler))
            .route("/{id}", web::delete().to(delete_question_handler))
            .route("/{id}/answer", web::post().to(submit_answer_handler)),
    );
}
