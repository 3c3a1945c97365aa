//! Translation of domain errors into HTTP responses.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::error;

use crate::domain::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

/// An error response: status code plus a `{"error", "code"}` body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: message.into(),
                code: code.to_string(),
            },
        }
    }

    /// A missing entity, or one that exists under a different ledger
    pub fn not_found(what: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", format!("{} not found", what))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// JSON body extractor whose rejections use the shared error body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Malformed, mistyped or non-JSON bodies are validation failures
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILURE", rejection.body_text())
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let code = e.code();
        match e {
            DomainError::Validation(message) => Self::new(StatusCode::BAD_REQUEST, code, message),
            DomainError::NeighborNotFound { .. } => {
                Self::new(StatusCode::CONFLICT, code, e.to_string())
            }
            DomainError::CreationFailure(_) => {
                error!("Creation failed: {}", e);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, e.to_string())
            }
            DomainError::Storage(_) => {
                error!("Storage failure: {}", e);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, "Internal storage error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::NeighborNotFound { id: 4 }, StatusCode::CONFLICT),
            (
                DomainError::CreationFailure("no row".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (DomainError::from(anyhow::anyhow!("disk full")), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (domain_error, status) in cases {
            assert_eq!(ApiError::from(domain_error).status(), status);
        }
    }

    #[test]
    fn test_storage_details_stay_out_of_the_body() {
        let api_error =
            ApiError::from(DomainError::from(anyhow::anyhow!("/var/lib/secret.db is locked")));
        assert_eq!(api_error.body.code, "STORAGE_FAILURE");
        assert!(!api_error.body.error.contains("secret"));
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let api_error = ApiError::from(DomainError::validation("Kid name cannot be empty"));
        assert_eq!(api_error.body.error, "Kid name cannot be empty");
        assert_eq!(api_error.body.code, "VALIDATION_FAILURE");
    }

    #[tokio::test]
    async fn test_mistyped_json_body_is_a_validation_failure() {
        use axum::{body::Body, http::Request};
        use shared::UpdateBalanceRequest;

        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"amount":"5","operation":"add"}"#))
            .unwrap();
        let rejection = ApiJson::<UpdateBalanceRequest>::from_request(request, &())
            .await
            .err()
            .unwrap();

        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
        assert_eq!(rejection.body.code, "VALIDATION_FAILURE");
    }
}
