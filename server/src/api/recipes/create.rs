use super::get::find_recipe;
use super::RecipeResponse;
use crate::api::{is_foreign_key_violation, ApiError, ApiJson, ErrorResponse};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::NewRecipe;
use crate::schema::{categories, recipes};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use larder_core::{require_text, slugify, Operation, Policy, MAX_TITLE_LEN};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub instructions: String,
    /// Category ID
    pub category: Uuid,
}

pub fn unknown_category(id: Uuid) -> ApiError {
    ApiError::BadRequest(format!("Invalid category \"{}\" - object does not exist.", id))
}

/// 400 unless the category exists.
pub fn ensure_category(conn: &mut PgConnection, id: Uuid) -> Result<(), ApiError> {
    let found: i64 = categories::table
        .find(id)
        .count()
        .get_result(conn)?;
    if found == 0 {
        return Err(unknown_category(id));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Invalid request or unknown category", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    body: Result<ApiJson<CreateRecipeRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    caller.authorize(Policy::AuthenticatedOrReadOnly, Operation::Create)?;
    let user = caller.into_user()?;
    let ApiJson(request) = body?;

    let title = require_text("Title", &request.title, Some(MAX_TITLE_LEN))?;
    let instructions = require_text("Instructions", &request.instructions, None)?;
    let slug = slugify(&title);

    let mut conn = pool.get()?;
    ensure_category(&mut conn, request.category)?;

    let recipe_id: Uuid = diesel::insert_into(recipes::table)
        .values(NewRecipe {
            author_id: user.id,
            category_id: request.category,
            title: &title,
            instructions: &instructions,
            slug: &slug,
        })
        .returning(recipes::id)
        .get_result(&mut conn)
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                unknown_category(request.category)
            } else {
                e.into()
            }
        })?;

    tracing::info!(recipe_id = %recipe_id, author_id = %user.id, "recipe created");

    let recipe = find_recipe(&mut conn, recipe_id)?;
    Ok((StatusCode::CREATED, Json(recipe)))
}
