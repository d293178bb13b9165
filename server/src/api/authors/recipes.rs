use super::find_author;
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
    path = "/api/authors/{id}/recipes",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID"), ListParams),
    responses(
        (status = 200, description = "Recipes written by the author", body = Vec<RecipeResponse>),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn list_author_recipes(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(id): ApiPath<PathId>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let mut conn = pool.get()?;
    let author = find_author(&mut conn, &id)?;
    let recipes = load_recipes(&mut conn, RecipeScope::Author(author.id), &params)?;
    Ok(Json(recipes))
}
