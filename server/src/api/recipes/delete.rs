use super::parent_recipe;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::schema::recipes;
use axum::{extract::State, http::StatusCode};
use diesel::prelude::*;
use larder_core::{Operation, Policy};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/recipes/{recipe_id}",
    tag = "recipes",
    params(("recipe_id" = Uuid, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted along with its ingredients, images, reviews and ratings"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the author can delete a recipe", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(id): ApiPath<PathId>,
) -> Result<StatusCode, ApiError> {
    caller.authorize(Policy::AuthenticatedOrReadOnly, Operation::Delete)?;

    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &id)?;
    caller.authorize(Policy::OwnerOrReadOnly(recipe.author_id), Operation::Delete)?;

    diesel::delete(recipes::table.find(recipe.id)).execute(&mut conn)?;

    tracing::info!(recipe_id = %recipe.id, "recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}
