// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::PasswordError;
use crate::database::DatabaseError;

pub const ACCESS_DENIED: &str = "Access Denied";
pub const COURSE_NOT_FOUND: &str = "Oops! We can't find that course";
pub const NOT_COURSE_OWNER: &str = "You can only change courses that you own";
pub const EMAIL_IN_USE: &str = "That email address is already in use!";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request, one message per failing field
    ValidationError(Vec<String>),
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized,

    // 403 Forbidden
    Forbidden(String),

    // Course lookups answer 400 rather than 404
    NotFound(String),

    // 404 for unknown routes
    RouteNotFound,

    // 405 for a known route hit with an unsupported method
    MethodNotAllowed,

    // 413 Payload Too Large
    PayloadTooLarge,

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Client-safe message
    pub fn message(&self) -> String {
        match self {
            ApiError::ValidationError(messages) => messages.join("; "),
            ApiError::InvalidJson(msg) => msg.clone(),
            ApiError::Unauthorized => ACCESS_DENIED.to_string(),
            ApiError::Forbidden(msg) => msg.clone(),
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::RouteNotFound => "Route Not Found".to_string(),
            ApiError::MethodNotAllowed => "Method Not Allowed".to_string(),
            ApiError::PayloadTooLarge => "Request body too large".to_string(),
            ApiError::InternalServerError(msg) => msg.clone(),
            ApiError::ServiceUnavailable(msg) => msg.clone(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::RouteNotFound => "ROUTE_NOT_FOUND",
            ApiError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ApiError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Response body. Validation failures list every message; everything
    /// else carries a single `message`.
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError(messages) => json!({ "errorMessages": messages }),
            _ => json!({ "message": self.message() }),
        }
    }
}

impl ApiError {
    pub fn validation_error(messages: Vec<String>) -> Self {
        ApiError::ValidationError(messages)
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn course_not_found() -> Self {
        ApiError::NotFound(COURSE_NOT_FOUND.to_string())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UniqueViolation(field) => {
                let message = if field == "emailAddress" {
                    EMAIL_IN_USE.to_string()
                } else {
                    format!("That {} is already in use!", field)
                };
                ApiError::validation_error(vec![message])
            }
            DatabaseError::NotFound(msg) => {
                tracing::debug!("Record disappeared mid-request: {}", msg);
                ApiError::course_not_found()
            }
            DatabaseError::Sqlx(sqlx::Error::PoolTimedOut) => {
                tracing::error!("Database pool timed out");
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            other => {
                // Log the real error but return generic message
                tracing::error!("Database error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        tracing::error!("Password processing error: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(code = self.error_code(), status = status.as_u16(), "request failed");
        } else {
            tracing::debug!(code = self.error_code(), status = status.as_u16(), "request rejected");
        }
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_list_every_message() {
        let err = ApiError::validation_error(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_json(), json!({ "errorMessages": ["a", "b"] }));
    }

    #[test]
    fn unauthorized_body_is_generic() {
        let err = ApiError::Unauthorized;
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_json(), json!({ "message": "Access Denied" }));
    }

    #[test]
    fn course_not_found_is_bad_request() {
        let err = ApiError::course_not_found();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_json(), json!({ "message": COURSE_NOT_FOUND }));
    }

    #[test]
    fn protocol_errors_keep_json_bodies() {
        assert_eq!(ApiError::MethodNotAllowed.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ApiError::MethodNotAllowed.to_json(), json!({ "message": "Method Not Allowed" }));
        assert_eq!(ApiError::PayloadTooLarge.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(ApiError::PayloadTooLarge.to_json(), json!({ "message": "Request body too large" }));
    }

    #[test]
    fn duplicate_email_maps_to_validation_error() {
        let err = ApiError::from(DatabaseError::UniqueViolation("emailAddress".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_json(), json!({ "errorMessages": [EMAIL_IN_USE] }));
    }

    #[test]
    fn store_failures_do_not_leak_details() {
        let err = ApiError::from(DatabaseError::Sqlx(sqlx::Error::Protocol(
            "relation \"courses\" does not exist".to_string(),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("courses"));
    }
}
