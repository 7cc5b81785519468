mod config;
mod constants;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod types;
mod utils;
mod validations;

use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use log::info;
use std::sync::Arc;

use crate::{
    config::database::{connect_to_database, create_unique_indexes},
    repositories::{
        achievement_repository::AchievementRepository, branch_repository::BranchRepository,
        chat_repository::ChatRepository, plan_repository::PlanRepository,
        question_repository::QuestionRepository, subscription_repository::SubscriptionRepository,
        user_achievement_repository::UserAchievementRepository,
        user_answer_repository::UserAnswerRepository, user_level_repository::UserLevelRepository,
        user_repository::UserRepository,
    },
    routes::{
        achievement_routes::configure_achievement_routes, auth_routes::configure_auth_routes,
        branch_routes::configure_branch_routes, chat_routes::configure_chat_routes,
        level_routes::configure_level_routes, payment_routes::configure_payment_routes,
        question_routes::configure_question_routes,
        subscription_routes::configure_subscription_routes, user_routes::configure_user_routes,
    },
    services::{
        achievement_service::AchievementService, branch_service::BranchService,
        chat_service::ChatService, paypal_service::PaypalService,
        progression_service::ProgressionService, question_service::QuestionService,
        stripe_service::StripeService, subscription_service::SubscriptionService,
        user_service::UserService,
    },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let client = connect_to_database().await?;
    create_unique_indexes(&client).await?;

    let user_repository = Arc::new(UserRepository::new(&client).await?);
    let branch_repository = Arc::new(BranchRepository::new(&client).await?);
    let question_repository = Arc::new(QuestionRepository::new(&client).await?);
    let user_answer_repository = Arc::new(UserAnswerRepository::new(&client).await?);
    let user_level_repository = Arc::new(UserLevelRepository::new(&client).await?);
    let achievement_repository = Arc::new(AchievementRepository::new(&client).await?);
    let user_achievement_repository = Arc::new(UserAchievementRepository::new(&client).await?);
    let plan_repository = Arc::new(PlanRepository::new(&client).await?);
    let subscription_repository = Arc::new(SubscriptionRepository::new(&client).await?);
    let chat_repository = Arc::new(ChatRepository::new(&client).await?);

    let user_service = Arc::new(UserService::new(user_repository.clone()));
    let branch_service = Arc::new(BranchService::new(branch_repository.clone()));
    let question_service = Arc::new(QuestionService::new(
        question_repository.clone(),
        branch_repository.clone(),
    ));
    let achievement_service = Arc::new(AchievementService::new(
        achievement_repository,
        user_achievement_repository,
    ));
    let progression_service = Arc::new(ProgressionService::new(
        question_repository,
        branch_repository,
        user_answer_repository,
        user_level_repository,
        achievement_service.clone(),
    ));
    let subscription_service = Arc::new(SubscriptionService::new(
        plan_repository,
        subscription_repository,
    ));
    let stripe_service = Arc::new(StripeService::new());
    let paypal_service = Arc::new(PaypalService::new());
    let chat_service = Arc::new(ChatService::new(chat_repository));

    // The auth extractor resolves users itself, so the repository is shared
    // app-wide rather than per scope.
    let user_repository_data = web::Data::new(user_repository);
    let user_service_data = web::Data::new(user_service);
    let branch_service_data = web::Data::new(branch_service);
    let question_service_data = web::Data::new(question_service);
    let achievement_service_data = web::Data::new(achievement_service);
    let progression_service_data = web::Data::new(progression_service);
    let subscription_service_data = web::Data::new(subscription_service);
    let stripe_service_data = web::Data::new(stripe_service);
    let paypal_service_data = web::Data::new(paypal_service);
    let chat_service_data = web::Data::new(chat_service);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    info!("Starting server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(user_repository_data.clone())
            .configure(|cfg| configure_auth_routes(cfg, user_service_data.clone()))
            .configure(|cfg| configure_user_routes(cfg, user_service_data.clone()))
            .configure(|cfg| configure_branch_routes(cfg, branch_service_data.clone()))
            .configure(|cfg| {
                configure_question_routes(
                    cfg,
                    question_service_data.clone(),
                    progression_service_data.clone(),
                )
            })
            .configure(|cfg| configure_level_routes(cfg, progression_service_data.clone()))
            .configure(|cfg| {
                configure_achievement_routes(cfg, achievement_service_data.clone())
            })
            .configure(|cfg| {
                configure_subscription_routes(cfg, subscription_service_data.clone())
            })
            .configure(|cfg| {
                configure_payment_routes(
                    cfg,
                    stripe_service_data.clone(),
                    paypal_service_data.clone(),
                    subscription_service_data.clone(),
                )
            })
            .configure(|cfg| {
                configure_chat_routes(
                    cfg,
                    chat_service_data.clone(),
                    subscription_service_data.clone(),
                )
            })
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
