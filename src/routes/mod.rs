pub mod achievement_routes;
pub mod auth_routes;
pub mod branch_routes;
pub mod chat_routes;
pub mod level_routes;
pub mod payment_routes;
pub mod question_routes;
pub mod subscription_routes;
pub mod user_routes;
