pub mod achievement_handler;
pub mod auth_handler;
pub mod branch_handler;
pub mod chat_handler;
pub mod level_handler;
pub mod paypal_handler;
pub mod question_handler;
pub mod stripe_handler;
pub mod subscription_handler;
pub mod user_handler;
