// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Every guard and validator in the request pipeline short-circuits with one
/// of these; the first failure wins and no further checks run.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request by default; registration uses 422
    MissingField { field: String, status: u16 },

    // 400 Bad Request (malformed id/email/types/whitespace)
    InvalidInput(String),

    // 400 Bad Request (malformed or self-referential foreign key)
    InvalidReference(String),

    // 404 Not Found (well-formed but nonexistent/unowned foreign key)
    ReferenceNotFound(String),

    // 404 Not Found (target resource absent or not owned by caller)
    NotFound(String),

    // 400 Bad Request (uniqueness violation: folder name, user email)
    DuplicateResource(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingField { status, .. } => *status,
            ApiError::InvalidInput(_) => 400,
            ApiError::InvalidReference(_) => 400,
            ApiError::ReferenceNotFound(_) => 404,
            ApiError::NotFound(_) => 404,
            ApiError::DuplicateResource(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            ApiError::MissingField { field, .. } => {
                format!("Missing `{}` in request body.", field)
            }
            ApiError::InvalidInput(msg) => msg.clone(),
            ApiError::InvalidReference(msg) => msg.clone(),
            ApiError::ReferenceNotFound(msg) => msg.clone(),
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::DuplicateResource(msg) => msg.clone(),
            ApiError::Unauthorized(msg) => msg.clone(),
            ApiError::InternalServerError(msg) => msg.clone(),
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::MissingField { .. } => "MISSING_FIELD",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::InvalidReference(_) => "INVALID_REFERENCE",
            ApiError::ReferenceNotFound(_) => "REFERENCE_NOT_FOUND",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::DuplicateResource(_) => "DUPLICATE_RESOURCE",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        ApiError::MissingField { field: field.into(), status: 400 }
    }

    pub fn missing_field_with_status(field: impl Into<String>, status: u16) -> Self {
        ApiError::MissingField { field: field.into(), status }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    pub fn invalid_reference(message: impl Into<String>) -> Self {
        ApiError::InvalidReference(message.into())
    }

    pub fn reference_not_found(message: impl Into<String>) -> Self {
        ApiError::ReferenceNotFound(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn duplicate_resource(message: impl Into<String>) -> Self {
        ApiError::DuplicateResource(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Convert storage-layer errors to ApiError
impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        match err {
            crate::database::manager::DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            crate::database::manager::DatabaseError::UniqueViolation(msg) => {
                ApiError::duplicate_resource(msg)
            }
            crate::database::manager::DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
