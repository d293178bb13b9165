use super::ImageResponse;
use crate::api::recipes::parent_recipe;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::RecipeImage;
use crate::schema::recipe_images;
use axum::{extract::State, Json};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/recipes/{recipe_id}/images",
    tag = "images",
    params(("recipe_id" = Uuid, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Images of the recipe, oldest first", body = Vec<ImageResponse>),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn list_images(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(recipe_id): ApiPath<PathId>,
) -> Result<Json<Vec<ImageResponse>>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;

    let rows: Vec<RecipeImage> = recipe_images::table
        .filter(recipe_images::recipe_id.eq(recipe.id))
        .order((recipe_images::created_at.asc(), recipe_images::id.asc()))
        .select(RecipeImage::as_select())
        .load(&mut conn)?;

    Ok(Json(
        rows.into_iter()
            .map(|image| ImageResponse::new(image, &recipe))
            .collect(),
    ))
}
