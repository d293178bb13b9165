use super::author_not_found;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::schema::users;
use axum::{extract::State, http::header, response::IntoResponse};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/authors/{id}/image",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Profile image bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Author or image not found", body = ErrorResponse)
    )
)]
pub async fn get_author_image(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(id): ApiPath<PathId>,
) -> Result<impl IntoResponse, ApiError> {
    let id = id.resolve(|raw| author_not_found(raw))?;
    let mut conn = pool.get()?;

    let (content_type, data): (Option<String>, Option<Vec<u8>>) = users::table
        .filter(users::id.eq(id))
        .filter(users::is_superuser.eq(false))
        .select((users::image_content_type, users::image_data))
        .first(&mut conn)
        .optional()?
        .ok_or_else(|| author_not_found(id))?;

    match (content_type, data) {
        (Some(content_type), Some(data)) => Ok((
            [
                (header::CONTENT_TYPE, content_type),
                (header::CACHE_CONTROL, "no-cache".to_string()),
            ],
            data,
        )),
        _ => Err(ApiError::NotFound(
            "Author has no profile image.".to_string(),
        )),
    }
}
