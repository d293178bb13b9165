use crate::api::ApiError;
use crate::db::DbPool;
use crate::models::User;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use larder_core::{Actor, Operation, Policy};
use std::sync::Arc;

use super::db::{get_user_from_token, TokenLookup};

/// Extractor that requires a valid Authorization header and provides the
/// authenticated user.
///
/// ```ignore
/// async fn my_handler(AuthUser(user): AuthUser) -> impl IntoResponse {
///     // user is the authenticated User
/// }
/// ```
pub struct AuthUser(pub User);

/// Extractor for endpoints that are public for reads: no Authorization
/// header means an anonymous caller, while a header that is present but
/// malformed or carries an unknown token is still rejected.
pub struct MaybeUser(pub Option<User>);

impl MaybeUser {
    pub fn actor(&self) -> Option<Actor> {
        self.0.as_ref().map(User::actor)
    }

    /// Check `policy` for `operation` against the caller.
    pub fn authorize(&self, policy: Policy, operation: Operation) -> Result<(), ApiError> {
        policy
            .check(operation, self.actor().as_ref())
            .map_err(ApiError::from)
    }

    /// The caller, for operations that already passed an authenticated policy.
    pub fn into_user(self) -> Result<User, ApiError> {
        self.0.ok_or(ApiError::Unauthenticated)
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, ApiError> {
    let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::InvalidCredentials("Invalid Authorization header"))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(Some)
        .ok_or(ApiError::InvalidCredentials(
            "Invalid Authorization header format",
        ))
}

fn resolve(pool: &DbPool, token: &str) -> Result<User, ApiError> {
    match get_user_from_token(pool, token) {
        TokenLookup::Found(user) => Ok(user),
        TokenLookup::NotFound => Err(ApiError::InvalidCredentials("Invalid or expired token")),
        TokenLookup::Unavailable => Err(ApiError::Internal("Failed to verify token".to_string())),
    }
}

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
    Arc<DbPool>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts)? else {
            return Ok(MaybeUser(None));
        };

        let pool = Arc::<DbPool>::from_ref(state);
        resolve(&pool, token).map(|user| MaybeUser(Some(user)))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<DbPool>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or(ApiError::InvalidCredentials("Missing Authorization header"))?;

        let pool = Arc::<DbPool>::from_ref(state);
        resolve(&pool, token).map(AuthUser)
    }
}
