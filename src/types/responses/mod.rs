pub mod achievement_progress;
pub mod answer_outcome;
pub mod api_response;
pub mod question_view;
pub mod subscription_view;
