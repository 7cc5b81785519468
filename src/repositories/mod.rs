pub mod achievement_repository;
pub mod branch_repository;
pub mod chat_repository;
pub mod plan_repository;
pub mod question_repository;
pub mod subscription_repository;
pub mod user_achievement_repository;
pub mod user_answer_repository;
pub mod user_level_repository;
pub mod user_repository;
