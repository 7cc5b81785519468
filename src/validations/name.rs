use validator::ValidationError;

use crate::utils::{
    locale_utils::{Messages, Namespace},
    validation_utils::add_error,
};

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 100;

pub fn validate_name(name: &str, messages: &Messages) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(messages.get_str(
            Namespace::Validation,
            "name.empty",
            "Name must not be empty",
        ));
    }

    if name.len() < MIN_NAME_LENGTH {
        errors.push(messages.get_str(
            Namespace::Validation,
            "name.too_short",
            &format!("Name must be at least {} characters long", MIN_NAME_LENGTH),
        ));
    }

    if name.len() > MAX_NAME_LENGTH {
        errors.push(messages.get_str(
            Namespace::Validation,
            "name.too_long",
            &format!("Name must be less than {} characters", MAX_NAME_LENGTH),
        ));
    }

    if !name.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        errors.push(messages.get_str(
            Namespace::Validation,
            "name.invalid_chars",
            "Name can only contain letters and spaces",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        let concatenated = errors.join(", ");
        let message = messages.get_str(
            Namespace::Validation,
            "name.invalid",
            &format!("The provided name is invalid ({})", concatenated),
        );
        Err(add_error("name.invalid", message, name))
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
    fn accepts_letters_and_spaces() {
        assert!(validate_name("Ada Lovelace", &messages()).is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(validate_name("", &messages()).is_err());
    }

    #[test]
    fn rejects_digits() {
        assert!(validate_name("Ada 2", &messages()).is_err());
    }

    #[test]
    fn rejects_overlong() {
        assert!(validate_name(&"a".repeat(101), &messages()).is_err());
    }
}
