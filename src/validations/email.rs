use email_address::EmailAddress;
use validator::ValidationError;

use crate::utils::{
    locale_utils::{Messages, Namespace},
    validation_utils::add_error,
};

const MIN_EMAIL_LENGTH: usize = 5;
const MAX_EMAIL_LENGTH: usize = 254;
const MIN_TLD_LENGTH: usize = 2;

fn has_valid_length(email: &str, messages: &Messages) -> Result<(), String> {
    if email.len() < MIN_EMAIL_LENGTH || email.len() > MAX_EMAIL_LENGTH {
        return Err(messages.get_str(
            Namespace::Validation,
            "email.invalid_length",
            &format!(
                "Email must be between {} and {} characters",
                MIN_EMAIL_LENGTH, MAX_EMAIL_LENGTH
            ),
        ));
    }
    Ok(())
}

fn has_no_invalid_chars(email: &str, messages: &Messages) -> Result<(), String> {
    if email.chars().any(|c| c == ' ' || !c.is_ascii()) {
        return Err(messages.get_str(
            Namespace::Validation,
            "email.invalid_chars",
            "Email must not contain spaces or non-ASCII characters",
        ));
    }
    Ok(())
}

fn has_valid_tld(email: &str, messages: &Messages) -> Result<(), String> {
    let tld_ok = email
        .split('@')
        .nth(1)
        .and_then(|domain| domain.rsplit('.').next())
        .map(|tld| tld.len() >= MIN_TLD_LENGTH && tld.chars().all(|c| c.is_alphabetic()))
        .unwrap_or(false);

    if !tld_ok {
        return Err(messages.get_str(
            Namespace::Validation,
            "email.invalid_tld",
            "The TLD must be at least 2 characters long and alphabetic",
        ));
    }
    Ok(())
}

fn has_valid_syntax(email: &str, messages: &Messages) -> Result<(), String> {
    if !EmailAddress::is_valid(email) {
        return Err(messages.get_str(
            Namespace::Validation,
            "email.invalid_format",
            "Invalid email format",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str, messages: &Messages) -> Result<(), ValidationError> {
    let checks = [
        has_valid_length(email, messages),
        has_no_invalid_chars(email, messages),
        has_valid_tld(email, messages),
        has_valid_syntax(email, messages),
    ];

    let errors: Vec<String> = checks.into_iter().filter_map(Result::err).collect();

    if errors.is_empty() {
        Ok(())
    } else {
        let concatenated = errors.join(", ");
        let message = messages.get_str(
            Namespace::Validation,
            "email.invalid",
            &format!("The provided email is invalid ({})", concatenated),
        );
        Err(add_error("email.invalid", message, email))
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
    fn accepts_a_normal_address() {
        assert!(validate_email("ada@example.com", &messages()).is_ok());
    }

    #[test]
    fn rejects_missing_at_sign() {
        assert!(validate_email("ada.example.com", &messages()).is_err());
    }

    #[test]
    fn rejects_spaces() {
        assert!(validate_email("ada lovelace@example.com", &messages()).is_err());
    }

    #[test]
    fn rejects_numeric_tld() {
        assert!(validate_email("ada@example.c0m", &messages()).is_err());
    }

    #[test]
    fn rejects_too_short() {
        assert!(validate_email("a@b", &messages()).is_err());
    }
}
