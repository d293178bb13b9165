use super::create::{category_slug, ensure_unique};
use super::get::{category_not_found, find_category};
use super::CategoryResponse;
use crate::api::{
    is_unique_violation, require_on_put, ApiError, ApiJson, ApiPath, ErrorResponse, PathId,
};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::{Category, CategoryChanges};
use crate::schema::categories;
use axum::{extract::State, http::Method, Json};
use diesel::prelude::*;
use larder_core::{require_text, Operation, Policy, MAX_TITLE_LEN};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// PUT requires every field, PATCH accepts any subset.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Invalid or duplicate title or slug", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only administrators can edit categories", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    method: Method,
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(id): ApiPath<PathId>,
    body: Result<ApiJson<UpdateCategoryRequest>, ApiError>,
) -> Result<Json<CategoryResponse>, ApiError> {
    caller.authorize(Policy::AdminOrReadOnly, Operation::Update)?;

    let id = id.resolve(|raw| category_not_found(raw))?;
    let mut conn = pool.get()?;
    let existing = find_category(&mut conn, id)?;

    let ApiJson(request) = body?;
    require_on_put(&method, "title", &request.title)?;
    require_on_put(&method, "slug", &request.slug)?;

    let title = request
        .title
        .as_deref()
        .map(|t| require_text("Title", t, Some(MAX_TITLE_LEN)))
        .transpose()?;
    let slug = request
        .slug
        .as_deref()
        .map(category_slug)
        .transpose()?;

    if title.is_none() && slug.is_none() {
        return Ok(Json(existing.into()));
    }

    ensure_unique(&mut conn, title.as_deref(), slug.as_deref(), Some(id))?;

    let category: Category = diesel::update(categories::table.find(id))
        .set(CategoryChanges {
            title: title.as_deref(),
            slug: slug.as_deref(),
        })
        .returning(Category::as_returning())
        .get_result(&mut conn)
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::BadRequest("category with this title or slug already exists.".to_string())
            } else {
                e.into()
            }
        })?;

    Ok(Json(category.into()))
}
