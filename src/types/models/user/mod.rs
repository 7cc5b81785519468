pub mod defaults;
pub mod role;
pub mod user_status;
