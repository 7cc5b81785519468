use validator::ValidationError;

use crate::utils::{
    locale_utils::{Messages, Namespace},
    validation_utils::add_error,
};

const MIN_PASSWORD_LENGTH: usize = 8;

pub fn validate_password(password: &str, messages: &Messages) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if password.len() < MIN_PASSWORD_LENGTH {
        errors.push(messages.get_str(
            Namespace::Validation,
            "password.too_short",
            &format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            ),
        ));
    }

    if password.contains(' ') {
        errors.push(messages.get_str(
            Namespace::Validation,
            "password.contains_space",
            "Password must not contain spaces",
        ));
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push(messages.get_str(
            Namespace::Validation,
            "password.missing_uppercase",
            "Password must contain at least one uppercase letter",
        ));
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push(messages.get_str(
            Namespace::Validation,
            "password.missing_lowercase",
            "Password must contain at least one lowercase letter",
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(messages.get_str(
            Namespace::Validation,
            "password.missing_digit",
            "Password must contain at least one digit",
        ));
    }

    if !password.chars().any(|c| !c.is_alphanumeric()) {
        errors.push(messages.get_str(
            Namespace::Validation,
            "password.missing_special_char",
            "Password must contain at least one special character",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        let concatenated = errors.join(", ");
        let message = messages.get_str(
            Namespace::Validation,
            "password.invalid",
            &format!("The provided password is invalid ({})", concatenated),
        );
        Err(add_error("password.invalid", message, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::locale_utils::{Lang, Messages};

    fn messages() -> Messages {
        Messages::new(Lang::En)
    }

    #[test]
    fn accepts_a_strong_password() {
        assert!(validate_password("S3cret!pass", &messages()).is_ok());
    }

    #[test]
    fn rejects_short_password() {
        assert!(validate_password("S3c!p", &messages()).is_err());
    }

    #[test]
    fn rejects_missing_digit() {
        assert!(validate_password("Secret!pass", &messages()).is_err());
    }

    #[test]
    fn rejects_missing_special_char() {
        assert!(validate_password("S3cretpass", &messages()).is_err());
    }

    #[test]
    fn rejects_spaces() {
        assert!(validate_password("S3cret !pass", &messages()).is_err());
    }
}
