use super::{find_review, ReviewResponse};
use crate::api::recipes::parent_recipe;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use axum::{extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/recipes/{recipe_id}/reviews/{id}",
    tag = "reviews",
    params(
        ("recipe_id" = Uuid, Path, description = "Recipe ID"),
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review details", body = ReviewResponse),
        (status = 404, description = "Recipe or review not found", body = ErrorResponse)
    )
)]
pub async fn get_review(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath((recipe_id, id)): ApiPath<(PathId, PathId)>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    let (review, author_name) = find_review(&mut conn, recipe.id, &id)?;
    Ok(Json(ReviewResponse::new(review, author_name, &recipe)))
}
