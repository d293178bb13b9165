use super::{find_ingredient, IngredientResponse};
use crate::api::recipes::parent_recipe;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use axum::{extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/recipes/{recipe_id}/ingredients/{id}",
    tag = "ingredients",
    params(
        ("recipe_id" = Uuid, Path, description = "Recipe ID"),
        ("id" = Uuid, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Ingredient details", body = IngredientResponse),
        (status = 404, description = "Recipe or ingredient not found", body = ErrorResponse)
    )
)]
pub async fn get_ingredient(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath((recipe_id, id)): ApiPath<(PathId, PathId)>,
) -> Result<Json<IngredientResponse>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    let ingredient = find_ingredient(&mut conn, recipe.id, &id)?;
    Ok(Json(IngredientResponse::new(ingredient, &recipe)?))
}
