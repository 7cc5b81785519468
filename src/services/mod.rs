pub mod achievement_service;
pub mod branch_service;
pub mod chat_service;
pub mod paypal_service;
pub mod progression_service;
pub mod question_service;
pub mod stripe_service;
pub mod subscription_service;
pub mod user_service;
