pub mod auth;
pub mod branch;
pub mod chat;
pub mod payment;
pub mod question;
pub mod subscription;
pub mod user;
