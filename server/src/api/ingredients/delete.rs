use super::find_ingredient;
use crate::api::recipes::parent_recipe;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::schema::ingredients;
use axum::{extract::State, http::StatusCode};
use diesel::prelude::*;
use larder_core::{Operation, Policy};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/recipes/{recipe_id}/ingredients/{id}",
    tag = "ingredients",
    params(
        ("recipe_id" = Uuid, Path, description = "Recipe ID"),
        ("id" = Uuid, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the recipe author can delete ingredients", body = ErrorResponse),
        (status = 404, description = "Recipe or ingredient not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_ingredient(
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath((recipe_id, id)): ApiPath<(PathId, PathId)>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    caller.authorize(Policy::OwnerOrReadOnly(recipe.author_id), Operation::Delete)?;
    let ingredient = find_ingredient(&mut conn, recipe.id, &id)?;

    diesel::delete(ingredients::table.find(ingredient.id)).execute(&mut conn)?;

    Ok(StatusCode::NO_CONTENT)
}
