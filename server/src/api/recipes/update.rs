use super::create::{ensure_category, unknown_category};
use super::get::find_recipe;
use super::{parent_recipe, RecipeResponse};
use crate::api::{
    is_foreign_key_violation, require_on_put, ApiError, ApiJson, ApiPath, ErrorResponse, PathId,
};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::RecipeChanges;
use crate::schema::recipes;
use axum::{extract::State, http::Method, Json};
use chrono::Utc;
use diesel::prelude::*;
use larder_core::{require_text, slugify, Operation, Policy, MAX_TITLE_LEN};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// PUT requires every field, PATCH accepts any subset.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub instructions: Option<String>,
    /// Category ID
    pub category: Option<Uuid>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{recipe_id}",
    tag = "recipes",
    params(("recipe_id" = Uuid, Path, description = "Recipe ID")),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Invalid request or unknown category", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the author can edit a recipe", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    method: Method,
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(id): ApiPath<PathId>,
    body: Result<ApiJson<UpdateRecipeRequest>, ApiError>,
) -> Result<Json<RecipeResponse>, ApiError> {
    caller.authorize(Policy::AuthenticatedOrReadOnly, Operation::Update)?;

    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &id)?;
    caller.authorize(Policy::OwnerOrReadOnly(recipe.author_id), Operation::Update)?;
    let id = recipe.id;

    let ApiJson(request) = body?;

    require_on_put(&method, "title", &request.title)?;
    require_on_put(&method, "instructions", &request.instructions)?;
    require_on_put(&method, "category", &request.category)?;

    let title = request
        .title
        .as_deref()
        .map(|t| require_text("Title", t, Some(MAX_TITLE_LEN)))
        .transpose()?;
    let instructions = request
        .instructions
        .as_deref()
        .map(|i| require_text("Instructions", i, None))
        .transpose()?;
    let slug = title.as_deref().map(slugify);

    if let Some(category_id) = request.category {
        ensure_category(&mut conn, category_id)?;
    }

    diesel::update(recipes::table.find(id))
        .set(RecipeChanges {
            category_id: request.category,
            title: title.as_deref(),
            instructions: instructions.as_deref(),
            slug: slug.as_deref(),
            updated: Utc::now(),
        })
        .execute(&mut conn)
        .map_err(|e| match request.category {
            Some(category_id) if is_foreign_key_violation(&e) => unknown_category(category_id),
            _ => e.into(),
        })?;

    Ok(Json(find_recipe(&mut conn, id)?))
}
