//! Application error type mapping to HTTP status codes and JSON bodies.
//!
//! Every error body has the shape `{"message": "...", "errors": [...]}`;
//! `errors` is only present for request validation failures.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use dumai_types::error::{ChatError, FieldViolation};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors raised by the chat orchestrator.
    Chat(ChatError),
    /// Body or path parameter that could not be decoded.
    MalformedBody(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

/// One entry of the `errors` array.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    pub message: String,
}

impl From<&FieldViolation> for ErrorDetail {
    fn from(v: &FieldViolation) -> Self {
        Self {
            field: Some(v.field),
            message: v.message.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDetail>,
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        let plain = |status: StatusCode, message: String| {
            (
                status,
                ErrorBody {
                    message,
                    errors: Vec::new(),
                },
            )
        };

        match self {
            AppError::MalformedBody(reason) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: "Invalid request body".to_string(),
                    errors: vec![ErrorDetail {
                        field: None,
                        message: reason.clone(),
                    }],
                },
            ),
            AppError::Chat(ChatError::Validation(violations)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: "Invalid request body".to_string(),
                    errors: violations.iter().map(ErrorDetail::from).collect(),
                },
            ),
            AppError::Chat(e @ (ChatError::SessionNotFound(_) | ChatError::UserNotFound(_))) => {
                plain(StatusCode::NOT_FOUND, e.to_string())
            }
            AppError::Chat(ChatError::Upstream(e)) => {
                plain(StatusCode::BAD_GATEWAY, e.user_message().to_string())
            }
            AppError::Chat(e @ (ChatError::Unresolved | ChatError::Storage(_))) => {
                plain(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = ?self, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dumai_types::error::ReplyError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Chat(ChatError::Validation(vec![])), StatusCode::BAD_REQUEST),
            (AppError::MalformedBody("eof".into()), StatusCode::BAD_REQUEST),
            (AppError::Chat(ChatError::SessionNotFound("x".into())), StatusCode::NOT_FOUND),
            (AppError::Chat(ChatError::UserNotFound(3)), StatusCode::NOT_FOUND),
            (
                AppError::Chat(ChatError::Upstream(ReplyError::RateLimited)),
                StatusCode::BAD_GATEWAY,
            ),
            (AppError::Chat(ChatError::Unresolved), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            assert_eq!(error.status_and_body().0, expected);
        }
    }

    #[test]
    fn test_validation_body_names_fields() {
        let error = AppError::Chat(ChatError::Validation(vec![FieldViolation::new(
            "username",
            "must not be blank",
        )]));
        let (_, body) = error.status_and_body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["errors"][0]["field"], "username");
        assert_eq!(json["errors"][0]["message"], "must not be blank");
    }

    #[test]
    fn test_upstream_body_is_human_readable() {
        let error = AppError::Chat(ChatError::Upstream(ReplyError::Unavailable("boom".into())));
        let (_, body) = error.status_and_body();
        assert!(body.message.contains("Even my errors are wrong"));
        assert!(!body.message.contains("boom"));
        assert!(body.errors.is_empty());
    }
}
