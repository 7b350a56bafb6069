use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not found")]
    NotFound,
    #[error("Rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Map a non-success response into an error, keeping the server's message
    /// when the body carries one.
    ///
    /// Only 401 means the token is missing or expired. A 403 is a permission
    /// refusal for a signed-in user and keeps its message.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            _ => ApiError::Rejected {
                status: status.as_u16(),
                message: extract_message(body).unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                }),
            },
        }
    }
}

/// Pull a human readable message out of an error payload.
///
/// The backend answers either `{"error": "..."}`, `{"detail": "..."}` or a
/// field error map like `{"text": ["This field may not be blank."]}`.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    for key in ["error", "detail", "message"] {
        if let Some(Value::String(s)) = object.get(key) {
            return Some(s.clone());
        }
    }

    let fields = object
        .iter()
        .filter_map(|(field, errors)| {
            let first = match errors {
                Value::Array(items) => items.first()?.as_str()?.to_string(),
                Value::String(s) => s.clone(),
                _ => return None,
            };
            Some(format!("{}: {}", field, first))
        })
        .collect::<Vec<_>>();

    if fields.is_empty() {
        None
    } else {
        Some(fields.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_401_is_unauthorized() {
        assert!(ApiError::from_status(StatusCode::UNAUTHORIZED, "").is_unauthorized());
        assert!(!ApiError::from_status(StatusCode::FORBIDDEN, "{}").is_unauthorized());
    }

    #[test]
    fn forbidden_keeps_the_permission_message() {
        let err = ApiError::from_status(
            StatusCode::FORBIDDEN,
            r#"{"error": "You do not have permission to add tasks to this group."}"#,
        );
        match err {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "You do not have permission to add tasks to this group.");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let bare = ApiError::from_status(StatusCode::FORBIDDEN, "");
        assert_eq!(bare.to_string(), "Rejected (403): Forbidden");
    }

    #[test]
    fn error_payload_message_is_kept() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"error": "Username already exists."}"#,
        );
        assert_eq!(err.to_string(), "Rejected (400): Username already exists.");
    }

    #[test]
    fn field_errors_are_flattened() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"text": ["This field may not be blank."]}"#,
        );
        match err {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "text: This field may not be blank.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unparseable_body_falls_back_to_reason() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>");
        assert_eq!(
            err.to_string(),
            "Rejected (500): Internal Server Error"
        );
    }
}
