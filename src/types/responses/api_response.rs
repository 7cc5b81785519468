use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            message: message.into(),
            error: None,
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>, error: ErrorDetails) -> Self {
        ApiResponse {
            message: message.into(),
            error: Some(error),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_omits_error_field() {
        let body = serde_json::to_value(ApiResponse::success("ok", 42)).unwrap();
        assert_eq!(body["message"], "ok");
        assert_eq!(body["data"], 42);
        assert!(body.get("error").is_none());
    }

    #[test]
    fn error_omits_data_field() {
        let body = serde_json::to_value(ApiResponse::<()>::error(
            "nope",
            ErrorDetails { details: None },
        ))
        .unwrap();
        assert_eq!(body["message"], "nope");
        assert!(body.get("data").is_none());
        assert!(body.get("error").is_some());
    }
}
