use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::{
    middleware::auth::{AuthenticatedUser, require_admin},
    services::{progression_service::ProgressionService, question_service::QuestionService},
    types::{
        requests::question::{
            create_question_request::CreateQuestionRequest,
            submit_answer_request::SubmitAnswerRequest,
            update_question_request::UpdateQuestionRequest,
        },
        responses::{api_response::ApiResponse, question_view::QuestionView},
    },
    utils::{
        locale_utils::{Messages, Namespace, get_lang},
        validation_utils::{handle_bad_request, handle_internal_error, parse_object_id},
    },
};

pub async fn create_question_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    question_service: web::Data<Arc<QuestionService>>,
    body: web::Json<CreateQuestionRequest>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    if let Err(resp) = require_admin(&auth) {
        return resp;
    }

    match question_service
        .create_question(body.into_inner(), &messages)
        .await
    {
        Ok(question) => HttpResponse::Created().json(ApiResponse::success(
            messages.get_str(
                Namespace::Quiz,
                "question.create_success",
                "Question created",
            ),
            question,
        )),
        Err(err) => handle_internal_error(err),
    }
}

/// Questions for one level of a branch, with the answer key stripped.
pub async fn get_level_questions_handler(
    req: HttpRequest,
    _auth: AuthenticatedUser,
    path: web::Path<(String, u32)>,
    question_service: web::Data<Arc<QuestionService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));
    let (branch_id, level) = path.into_inner();

    let invalid_id = messages.get_str(Namespace::Quiz, "branch.invalid_id", "Invalid branch id");
    let branch_id = match parse_object_id(&branch_id, &invalid_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match question_service
        .get_questions_for_level(branch_id, level, &messages)
        .await
    {
        Ok(questions) => {
            let views: Vec<QuestionView> =
                questions.into_iter().map(QuestionView::from).collect();
            HttpResponse::Ok().json(ApiResponse::success(
                messages.get_str(
                    Namespace::Quiz,
                    "question.fetch_success",
                    "Questions fetched",
                ),
                views,
            ))
        }
        Err(err) => handle_internal_error(err),
    }
}

pub async fn update_question_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<UpdateQuestionRequest>,
    question_service: web::Data<Arc<QuestionService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    if let Err(resp) = require_admin(&auth) {
        return resp;
    }

    let invalid_id =
        messages.get_str(Namespace::Quiz, "question.invalid_id", "Invalid question id");
    let question_id = match parse_object_id(&path.into_inner(), &invalid_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match question_service
        .update_question(question_id, body.into_inner(), &messages)
        .await
    {
        Ok(Some(question)) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(
                Namespace::Quiz,
                "question.update_success",
                "Question updated",
            ),
            question,
        )),
        Ok(None) => handle_bad_request(messages.get_str(
            Namespace::Quiz,
            "question.not_found",
            "Question not found",
        )),
        Err(err) => handle_internal_error(err),
    }
}

pub async fn delete_question_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    question_service: web::Data<Arc<QuestionService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    if let Err(resp) = require_admin(&auth) {
        return resp;
    }

    let invalid_id =
        messages.get_str(Namespace::Quiz, "question.invalid_id", "Invalid question id");
    let question_id = match parse_object_id(&path.into_inner(), &invalid_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match question_service
        .delete_question(question_id, &messages)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(
                Namespace::Quiz,
                "question.delete_success",
                "Question deleted",
            ),
            None::<()>,
        )),
        Err(err) => handle_internal_error(err),
    }
}

/// Grades an answer and returns the outcome, including any progression it
/// triggered and any achievements it unlocked.
pub async fn submit_answer_handler(
    req: HttpRequest,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<SubmitAnswerRequest>,
    progression_service: web::Data<Arc<ProgressionService>>,
) -> HttpResponse {
    let messages = Messages::new(get_lang(&req));

    let invalid_id =
        messages.get_str(Namespace::Quiz, "question.invalid_id", "Invalid question id");
    let question_id = match parse_object_id(&path.into_inner(), &invalid_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let Some(user_id) = auth.user_id() else {
        return handle_internal_error("Authenticated user has no id");
    };

    match progression_service
        .record_answer(user_id, question_id, body.selected_index, &messages)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_str(Namespace::Quiz, "answer.recorded", "Answer recorded"),
            outcome,
        )),
        Err(err) => handle_bad_request(err.to_string()),
    }
}
