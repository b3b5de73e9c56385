use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use super::json_body;
use crate::auth::hash_password;
use crate::database::models::NewUser;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::validation::{text, validate_new_user};

/// GET /users - minimal profile of the authenticated caller
pub async fn users_get(user: AuthUser) -> Json<Value> {
    Json(json!({
        "firstName": user.first_name,
        "username": user.email_address,
    }))
}

/// POST /users - register a new user
///
/// The password is bcrypt-hashed before it reaches the store. A taken email
/// address is rejected by the store's unique constraint and nothing is written.
pub async fn users_post(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body(payload)?;

    let messages = validate_new_user(&body);
    if !messages.is_empty() {
        return Err(ApiError::validation_error(messages));
    }

    let password = hash_password(
        text(&body, "password").unwrap_or_default(),
        state.config.security.bcrypt_cost,
    )
    .await?;

    let user = state
        .users
        .create_user(NewUser {
            first_name: text(&body, "firstName").unwrap_or_default(),
            last_name: text(&body, "lastName").unwrap_or_default(),
            email_address: text(&body, "emailAddress").unwrap_or_default().trim().to_string(),
            password,
        })
        .await?;

    tracing::info!("Registered user {} ({})", user.id, user.email_address);

    Ok((StatusCode::CREATED, [(LOCATION, "/")]))
}
