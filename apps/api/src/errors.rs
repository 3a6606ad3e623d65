use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::chat::contact::ContactError;
use crate::chat::session::SessionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::EmptyMessage => AppError::Validation(e.to_string()),
            SessionError::Closed | SessionError::TurnPending | SessionError::StaleTurn => {
                AppError::Conflict(e.to_string())
            }
            SessionError::Contact(inner) => inner.into(),
        }
    }
}

impl From<ContactError> for AppError {
    fn from(e: ContactError) -> Self {
        match e {
            ContactError::Validation(_) => AppError::Validation(e.to_string()),
            ContactError::InvalidTransition { .. } => AppError::Conflict(e.to_string()),
            ContactError::Send(_) => AppError::Internal(anyhow::anyhow!(e)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::contact::ContactPhase;

    #[test]
    fn test_session_errors_map_to_status() {
        let cases = [
            (SessionError::EmptyMessage, StatusCode::BAD_REQUEST),
            (SessionError::Closed, StatusCode::CONFLICT),
            (SessionError::TurnPending, StatusCode::CONFLICT),
            (SessionError::StaleTurn, StatusCode::CONFLICT),
            (
                SessionError::Contact(ContactError::InvalidTransition {
                    phase: ContactPhase::Idle,
                    action: "send",
                }),
                StatusCode::CONFLICT,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_contact_send_failure_is_internal() {
        let err = AppError::from(ContactError::Send("down".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
