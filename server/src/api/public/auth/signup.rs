use crate::api::{is_unique_violation, ApiError, ApiJson, ErrorResponse};
use crate::auth::{create_session, hash_password};
use crate::db::DbPool;
use crate::models::{NewUser, User};
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use larder_core::{validate_account, AccountFields};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body(content = SignupRequest, example = json!({"username": "cook", "email": "cook@example.com", "password": "password"})),
    responses(
        (status = 201, description = "User created successfully", body = SignupResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username or email already in use", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(pool): State<Arc<DbPool>>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let AccountFields { username, email } =
        validate_account(&req.username, &req.email, &req.password)?;

    let mut conn = pool.get()?;

    // Usernames and emails are unique regardless of case
    let taken: i64 = users::table
        .filter(
            sql::<Bool>("LOWER(username) = LOWER(")
                .bind::<Text, _>(&username)
                .sql(") OR LOWER(email) = LOWER(")
                .bind::<Text, _>(&email)
                .sql(")"),
        )
        .count()
        .get_result(&mut conn)?;
    if taken > 0 {
        return Err(ApiError::Conflict(
            "Username or email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;

    let user: User = diesel::insert_into(users::table)
        .values(NewUser {
            username: &username,
            email: &email,
            password_hash: &password_hash,
            is_superuser: false,
        })
        .returning(User::as_returning())
        .get_result(&mut conn)
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("Username or email already exists".to_string())
            } else {
                e.into()
            }
        })?;

    let token = create_session(&mut conn, user.id)?;

    tracing::info!(user_id = %user.id, "user signed up");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user_id: user.id,
            token,
        }),
    ))
}
