pub mod achievement_model;
pub mod branch_model;
pub mod chat_model;
pub mod plan_model;
pub mod question_model;
pub mod subscription_model;
pub mod user_answer_model;
pub mod user_level_model;
pub mod user_model;
