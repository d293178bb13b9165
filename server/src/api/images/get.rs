use super::{find_image, ImageResponse};
use crate::api::recipes::parent_recipe;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use axum::{extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/recipes/{recipe_id}/images/{id}",
    tag = "images",
    params(
        ("recipe_id" = Uuid, Path, description = "Recipe ID"),
        ("id" = Uuid, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image metadata", body = ImageResponse),
        (status = 404, description = "Recipe or image not found", body = ErrorResponse)
    )
)]
pub async fn get_image(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath((recipe_id, id)): ApiPath<(PathId, PathId)>,
) -> Result<Json<ImageResponse>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    let image = find_image(&mut conn, recipe.id, &id)?;
    Ok(Json(ImageResponse::new(image, &recipe)))
}
