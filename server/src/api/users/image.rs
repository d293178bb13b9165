use crate::api::upload::read_image_field;
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::schema::users;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
};
use chrono::Utc;
use diesel::prelude::*;
use larder_core::{validate_image, MAX_PROFILE_IMAGE_SIZE};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ProfileImageRequest {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[utoipa::path(
    put,
    path = "/api/users/me/image",
    tag = "users",
    request_body(content_type = "multipart/form-data", content = ProfileImageRequest),
    responses(
        (status = 204, description = "Profile image replaced"),
        (status = 400, description = "Too large or not an image", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn put_profile_image(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StatusCode, ApiError> {
    let mut multipart = multipart?;
    let data = read_image_field(&mut multipart, MAX_PROFILE_IMAGE_SIZE).await?;
    let content_type = validate_image(&data, MAX_PROFILE_IMAGE_SIZE)?;

    let mut conn = pool.get()?;
    diesel::update(users::table.find(user.id))
        .set((
            users::image_content_type.eq(Some(content_type)),
            users::image_data.eq(Some(data.to_vec())),
            users::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

    tracing::info!(user_id = %user.id, "profile image updated");

    Ok(StatusCode::NO_CONTENT)
}
