use super::{find_rating, RatingResponse};
use crate::api::recipes::parent_recipe;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use axum::{extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/recipes/{recipe_id}/ratings/{id}",
    tag = "ratings",
    params(
        ("recipe_id" = Uuid, Path, description = "Recipe ID"),
        ("id" = Uuid, Path, description = "Rating ID")
    ),
    responses(
        (status = 200, description = "Rating details", body = RatingResponse),
        (status = 404, description = "Recipe or rating not found", body = ErrorResponse)
    )
)]
pub async fn get_rating(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath((recipe_id, id)): ApiPath<(PathId, PathId)>,
) -> Result<Json<RatingResponse>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    let (rating, author_name) = find_rating(&mut conn, recipe.id, &id)?;
    Ok(Json(RatingResponse::new(rating, author_name, &recipe)))
}
