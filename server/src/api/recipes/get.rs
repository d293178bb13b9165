use super::list::{load_recipes, RecipeScope};
use super::RecipeResponse;
use crate::api::{ApiError, ApiPath, ErrorResponse, ListParams, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use axum::{extract::State, Json};
use diesel::PgConnection;
use std::sync::Arc;
use uuid::Uuid;

pub fn find_recipe(conn: &mut PgConnection, id: Uuid) -> Result<RecipeResponse, ApiError> {
    load_recipes(conn, RecipeScope::Single(id), &ListParams::default())?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::recipe_not_found(id))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{recipe_id}",
    tag = "recipes",
    params(("recipe_id" = Uuid, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(id): ApiPath<PathId>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let id = id.resolve(|raw| ApiError::recipe_not_found(raw))?;
    let mut conn = pool.get()?;
    Ok(Json(find_recipe(&mut conn, id)?))
}
