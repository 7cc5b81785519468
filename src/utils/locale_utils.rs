use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    En,
    Id,
    De,
}

impl Lang {
    pub fn from_code(code: &str) -> Self {
        match code.to_ascii_lowercase().as_str() {
            "id" => Self::Id,
            "de" => Self::De,
            _ => Self::En,
        }
    }

    fn folder(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::De => "de",
            Lang::Id => "id",
        }
    }
}

fn load_message_file(lang: Lang, namespace: &str) -> Value {
    let file_path = Path::new("locales")
        .join(lang.folder())
        .join(format!("{namespace}.json"));

    match fs::read_to_string(&file_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Failed to parse JSON from {:?}: {}", file_path, err);
                Value::Null
            }
        },
        Err(err) => {
            log::debug!("Failed to read locale file {:?}: {}", file_path, err);
            Value::Null
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Namespace {
    Validation,
    User,
    Quiz,
    Subscription,
    Chat,
}

impl Namespace {
    fn as_str(self) -> &'static str {
        match self {
            Namespace::Validation => "validation",
            Namespace::User => "user",
            Namespace::Quiz => "quiz",
            Namespace::Subscription => "subscription",
            Namespace::Chat => "chat",
        }
    }
}

#[derive(Debug)]
pub struct Messages {
    pub user: Value,
    pub validation: Value,
    pub quiz: Value,
    pub subscription: Value,
    pub chat: Value,
}

impl Messages {
    pub fn new(lang: Lang) -> Self {
        Self {
            user: load_message_file(lang, "user"),
            validation: load_message_file(lang, "validation"),
            quiz: load_message_file(lang, "quiz"),
            subscription: load_message_file(lang, "subscription"),
            chat: load_message_file(lang, "chat"),
        }
    }

    pub fn get(&self, namespace: Namespace, path: &str) -> Option<&Value> {
        let root = match namespace {
            Namespace::User => &self.user,
            Namespace::Validation => &self.validation,
            Namespace::Quiz => &self.quiz,
            Namespace::Subscription => &self.subscription,
            Namespace::Chat => &self.chat,
        };

        let mut current = root;
        for key in path.split('.') {
            match current.get(key) {
                Some(next) => current = next,
                None => {
                    log::debug!("Key '{}' not found in '{}.{}'", key, namespace.as_str(), path);
                    return None;
                }
            }
        }

        Some(current)
    }

    pub fn get_str(&self, namespace: Namespace, path: &str, fallback: &str) -> String {
        self.get(namespace, path)
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string()
    }
}

pub fn get_lang(req: &actix_web::HttpRequest) -> Lang {
    req.headers()
        .get("Accept-Language")
        .and_then(|value| value.to_str().ok())
        .and_then(|header| {
            header
                .split(',')
                .next()
                .and_then(|tag| tag.split('-').next())
        })
        .map(Lang::from_code)
        .unwrap_or(Lang::En)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn lang_from_code_falls_back_to_english() {
        assert_eq!(Lang::from_code("id"), Lang::Id);
        assert_eq!(Lang::from_code("DE"), Lang::De);
        assert_eq!(Lang::from_code("fr"), Lang::En);
        assert_eq!(Lang::from_code(""), Lang::En);
    }

    #[test]
    fn get_lang_reads_the_first_accept_language_tag() {
        let req = TestRequest::default()
            .insert_header(("Accept-Language", "id-ID,id;q=0.9,en;q=0.8"))
            .to_http_request();
        assert_eq!(get_lang(&req), Lang::Id);
    }

    #[test]
    fn get_lang_defaults_to_english_without_header() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(get_lang(&req), Lang::En);
    }

    #[test]
    fn get_str_uses_fallback_when_key_is_missing() {
        let messages = Messages {
            user: serde_json::json!({ "fetch": { "not_found": "User not found" } }),
            validation: Value::Null,
            quiz: Value::Null,
            subscription: Value::Null,
            chat: Value::Null,
        };

        assert_eq!(
            messages.get_str(Namespace::User, "fetch.not_found", "fallback"),
            "User not found"
        );
        assert_eq!(
            messages.get_str(Namespace::Quiz, "answer.duplicate", "Already answered"),
            "Already answered"
        );
    }
}
