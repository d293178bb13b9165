use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use larder_core::{Denial, ValidationError};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Authentication credentials were not provided")]
    Unauthenticated,

    #[error("{0}")]
    InvalidCredentials(&'static str),

    #[error("You do not have permission to perform this action")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("Method \"{0}\" not allowed.")]
    MethodNotAllowed(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database connection failed")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Database error: {0}")]
    Database(#[from] DieselError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated | ApiError::InvalidCredentials(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(DieselError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Pool(_) | ApiError::Database(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn recipe_not_found(id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("Recipe with id {} was not found.", id))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details are logged, never sent to the client
        let message = match &self {
            ApiError::Pool(e) => {
                tracing::error!("Database connection failed: {}", e);
                "Database connection failed".to_string()
            }
            ApiError::Database(DieselError::NotFound) => "Not found.".to_string(),
            ApiError::Database(e) => {
                tracing::error!("Database query failed: {}", e);
                "Internal server error".to_string()
            }
            ApiError::Internal(msg) => {
                tracing::error!("{}", msg);
                msg.clone()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<Denial> for ApiError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Unauthenticated => ApiError::Unauthenticated,
            Denial::Forbidden => ApiError::Forbidden,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        tracing::warn!("Multipart read error: {}", e);
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BadRequest("File too large".to_string())
        } else {
            ApiError::BadRequest(format!("Failed to read multipart data: {}", e.body_text()))
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub fn is_unique_violation(e: &DieselError) -> bool {
    matches!(
        e,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

pub fn is_foreign_key_violation(e: &DieselError) -> bool {
    matches!(
        e,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::MethodNotAllowed("PATCH".into()).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::Database(DieselError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Database(DieselError::RollbackTransaction).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_denial_conversion() {
        assert!(matches!(
            ApiError::from(Denial::Unauthenticated),
            ApiError::Unauthenticated
        ));
        assert!(matches!(ApiError::from(Denial::Forbidden), ApiError::Forbidden));
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err = ApiError::from(ValidationError::Blank("Title"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Title cannot be empty");
    }

    #[test]
    fn test_method_not_allowed_message() {
        assert_eq!(
            ApiError::MethodNotAllowed("PATCH".into()).to_string(),
            "Method \"PATCH\" not allowed."
        );
    }

    #[test]
    fn test_recipe_not_found_message() {
        assert_eq!(
            ApiError::recipe_not_found("abc").to_string(),
            "Recipe with id abc was not found."
        );
    }
}
