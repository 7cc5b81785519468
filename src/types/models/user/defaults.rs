use super::{role::Role, user_status::UserStatus};

pub fn default_role() -> Role {
    Role::User
}

pub fn default_status() -> UserStatus {
    UserStatus::Active
}
