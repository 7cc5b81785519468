pub mod email;
pub mod name;
pub mod password;
