use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use thiserror::Error;

use crate::auth::{parse_basic_auth, verify_password, PasswordError};
use crate::database::models::User;
use crate::database::{DatabaseError, UserStore};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context resolved from basic-auth credentials
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
        }
    }
}

/// Why a credential check was denied. Logged, never sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("missing credentials")]
    MissingCredentials,

    #[error("identity not found")]
    IdentityNotFound,

    #[error("secret mismatch")]
    SecretMismatch,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication denied: {0}")]
    Denied(AuthFailure),

    #[error(transparent)]
    Store(#[from] DatabaseError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Denied(reason) => {
                tracing::warn!(%reason, "authentication failed");
                ApiError::Unauthorized
            }
            AuthError::Store(e) => e.into(),
            AuthError::Password(e) => e.into(),
        }
    }
}

/// Resolve the caller from the `Authorization: Basic` header
pub async fn authenticate(users: &dyn UserStore, headers: &HeaderMap) -> Result<AuthUser, AuthError> {
    let credentials = parse_basic_auth(headers).ok_or(AuthError::Denied(AuthFailure::MissingCredentials))?;

    let user = users
        .find_user_by_email(&credentials.name)
        .await?
        .ok_or(AuthError::Denied(AuthFailure::IdentityNotFound))?;

    if !verify_password(credentials.pass, user.password.clone()).await? {
        return Err(AuthError::Denied(AuthFailure::SecretMismatch));
    }

    tracing::debug!("Authenticated user {} ({})", user.id, user.email_address);
    Ok(AuthUser::from(user))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(authenticate(state.users.as_ref(), &parts.headers).await?)
    }
}
