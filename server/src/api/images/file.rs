use super::image_not_found;
use crate::api::recipes::parent_recipe;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::schema::recipe_images;
use axum::{extract::State, http::header, response::IntoResponse};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/recipes/{recipe_id}/images/{id}/file",
    tag = "images",
    params(
        ("recipe_id" = Uuid, Path, description = "Recipe ID"),
        ("id" = Uuid, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Recipe or image not found", body = ErrorResponse)
    )
)]
pub async fn get_image_file(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath((recipe_id, id)): ApiPath<(PathId, PathId)>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    let id = id.resolve(|raw| image_not_found(raw))?;

    let (content_type, data): (String, Vec<u8>) = recipe_images::table
        .filter(recipe_images::recipe_id.eq(recipe.id))
        .filter(recipe_images::id.eq(id))
        .select((recipe_images::content_type, recipe_images::data))
        .first(&mut conn)
        .optional()?
        .ok_or_else(|| image_not_found(id))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CACHE_CONTROL,
                "public, max-age=31536000, immutable".to_string(),
            ),
        ],
        data,
    ))
}
