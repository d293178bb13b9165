use super::CategoryResponse;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::Category;
use crate::schema::categories;
use axum::{extract::State, Json};
use diesel::prelude::*;
use std::fmt::Display;
use std::sync::Arc;
use uuid::Uuid;

pub fn category_not_found(id: impl Display) -> ApiError {
    ApiError::NotFound(format!("Category with id {} was not found.", id))
}

pub fn find_category(conn: &mut PgConnection, id: Uuid) -> Result<Category, ApiError> {
    categories::table
        .find(id)
        .select(Category::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| category_not_found(id))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn get_category(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(id): ApiPath<PathId>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let id = id.resolve(|raw| category_not_found(raw))?;
    let mut conn = pool.get()?;
    let category = find_category(&mut conn, id)?;
    Ok(Json(category.into()))
}
