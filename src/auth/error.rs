// Authentication error types

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

use crate::error::ErrorResponse;
use crate::users::UserStoreError;

/// Coarse classification of an [`AuthError`], one per HTTP status family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    Conflict,
    BadRequest,
    Internal,
}

/// Authentication error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown username or wrong password
    #[error("Unauthorized")]
    InvalidCredentials,

    /// Correct password, but the account is disabled
    #[error("Inactive user")]
    InactiveUser,

    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Body was not valid JSON for the expected request type
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Hashing, persistence or signing failed; carries the underlying message
    #[error("{0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::InactiveUser
            | AuthError::MissingToken
            | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::UserAlreadyExists => ErrorKind::Conflict,
            AuthError::Validation(_) | AuthError::InvalidBody(_) => ErrorKind::BadRequest,
            AuthError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UserStoreError> for AuthError {
    fn from(err: UserStoreError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AuthError::Validation(errors) => {
                debug!("Validation error: {:?}", errors);
                ErrorResponse::new("VALIDATION_ERROR", "Request validation failed").with_details(
                    serde_json::to_value(errors).unwrap_or_else(|_| serde_json::json!({})),
                )
            }
            AuthError::InvalidBody(msg) => {
                debug!("Rejected request body: {}", msg);
                ErrorResponse::new("VALIDATION_ERROR", msg.clone())
            }
            AuthError::UserAlreadyExists => {
                warn!("Registration conflict: {}", self);
                ErrorResponse::new("CONFLICT", self.to_string())
            }
            AuthError::Internal(msg) => {
                // Details stay in the log
                error!("Internal error in auth: {}", msg);
                ErrorResponse::new("INTERNAL_ERROR", "An internal server error occurred")
            }
            _ => {
                warn!("Unauthorized request: {}", self);
                ErrorResponse::new("UNAUTHORIZED", self.to_string())
            }
        };

        body.into_response_with(status)
    }
}
