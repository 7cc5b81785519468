pub mod auth;
pub mod subscription;
