pub mod achievement;
pub mod chat;
pub mod subscription;
pub mod user;
