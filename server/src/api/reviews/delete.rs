use super::find_review;
use crate::api::recipes::parent_recipe;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::schema::reviews;
use axum::{extract::State, http::StatusCode};
use diesel::prelude::*;
use larder_core::{Operation, Policy};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/recipes/{recipe_id}/reviews/{id}",
    tag = "reviews",
    params(
        ("recipe_id" = Uuid, Path, description = "Recipe ID"),
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the review author can delete it", body = ErrorResponse),
        (status = 404, description = "Recipe or review not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_review(
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath((recipe_id, id)): ApiPath<(PathId, PathId)>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    caller.authorize(Policy::AuthenticatedOrReadOnly, Operation::Delete)?;
    let (review, _) = find_review(&mut conn, recipe.id, &id)?;
    caller.authorize(Policy::OwnerOrReadOnly(review.author_id), Operation::Delete)?;

    diesel::delete(reviews::table.find(review.id)).execute(&mut conn)?;

    Ok(StatusCode::NO_CONTENT)
}
