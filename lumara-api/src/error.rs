use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    /// Payment or text-generation call failed; the provider's message is
    /// passed through as a generic client error, not classified further.
    ExternalServiceError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::ExternalServiceError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn errors_map_to_their_statuses() {
        assert_eq!(status_of(AppError::AuthenticationError("x".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::AuthorizationError("x".into())), StatusCode::FORBIDDEN);
        assert_eq!(status_of(AppError::ValidationError("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::NotFoundError("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::ConflictError("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(AppError::ExternalServiceError("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AppError::InternalServerError("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
