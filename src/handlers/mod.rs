// handlers/mod.rs - route handlers grouped by resource
//
// Public:        GET /, GET /health, GET /courses, GET /courses/:id, POST /users
// Basic auth:    GET /users, POST /courses
// Owner only:    PUT /courses/:id, DELETE /courses/:id

pub mod courses;
pub mod system;
pub mod users;

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use serde_json::Value;

use crate::error::ApiError;

/// Unwrap a JSON body. Oversized bodies answer 413; every other extractor
/// rejection is a 400.
pub(crate) fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::debug!("Request body over limit: {}", rejection.body_text());
            Err(ApiError::PayloadTooLarge)
        }
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            Err(ApiError::invalid_json("Malformed JSON body"))
        }
    }
}

/// Course ids are integers; anything else can never match a course
pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}
