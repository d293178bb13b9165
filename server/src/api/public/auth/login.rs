use crate::api::{ApiError, ApiJson, ErrorResponse};
use crate::auth::{create_session, verify_password};
use crate::db::DbPool;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body(content = LoginRequest, example = json!({"username": "cook", "password": "password"})),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(pool): State<Arc<DbPool>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let mut conn = pool.get()?;

    let user: User = users::table
        .filter(
            diesel::dsl::sql::<diesel::sql_types::Bool>("LOWER(username) = LOWER(")
                .bind::<diesel::sql_types::Text, _>(req.username.trim())
                .sql(")"),
        )
        .select(User::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::InvalidCredentials(INVALID_CREDENTIALS))?;

    if !verify_password(&req.password, &user.password_hash) {
        tracing::info!(user_id = %user.id, "login rejected");
        return Err(ApiError::InvalidCredentials(INVALID_CREDENTIALS));
    }

    let token = create_session(&mut conn, user.id)?;

    Ok(Json(LoginResponse { token }))
}
