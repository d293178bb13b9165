use super::find_rating;
use crate::api::recipes::parent_recipe;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::schema::ratings;
use axum::{extract::State, http::StatusCode};
use diesel::prelude::*;
use larder_core::{Operation, Policy};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/recipes/{recipe_id}/ratings/{id}",
    tag = "ratings",
    params(
        ("recipe_id" = Uuid, Path, description = "Recipe ID"),
        ("id" = Uuid, Path, description = "Rating ID")
    ),
    responses(
        (status = 204, description = "Rating deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the rating author can delete it", body = ErrorResponse),
        (status = 404, description = "Recipe or rating not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_rating(
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath((recipe_id, id)): ApiPath<(PathId, PathId)>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    caller.authorize(Policy::AuthenticatedOrReadOnly, Operation::Delete)?;
    let (rating, _) = find_rating(&mut conn, recipe.id, &id)?;
    caller.authorize(Policy::OwnerOrReadOnly(rating.author_id), Operation::Delete)?;

    diesel::delete(ratings::table.find(rating.id)).execute(&mut conn)?;

    Ok(StatusCode::NO_CONTENT)
}
