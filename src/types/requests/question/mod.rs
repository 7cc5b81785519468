pub mod create_question_request;
pub mod submit_answer_request;
pub mod update_question_request;
