use super::get::{category_not_found, find_category};
use crate::api::recipes::list::{load_recipes, RecipeScope};
use crate::api::recipes::RecipeResponse;
use crate::api::{ApiError, ApiPath, ApiQuery, ErrorResponse, ListParams, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use axum::{extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/categories/{id}/recipes",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category ID"), ListParams),
    responses(
        (status = 200, description = "Recipes in the category", body = Vec<RecipeResponse>),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn list_category_recipes(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(id): ApiPath<PathId>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let id = id.resolve(|raw| category_not_found(raw))?;
    let mut conn = pool.get()?;
    find_category(&mut conn, id)?;
    let recipes = load_recipes(&mut conn, RecipeScope::Category(id), &params)?;
    Ok(Json(recipes))
}
