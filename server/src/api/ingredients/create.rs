use super::{ensure_unique_name, map_write_error, IngredientResponse};
use crate::api::recipes::parent_recipe;
use crate::api::{ApiError, ApiJson, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::{Ingredient, NewIngredient};
use crate::schema::ingredients;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use larder_core::{normalize_name, Operation, Policy, Quantity, Unit};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateIngredientRequest {
    pub name: String,
    /// Positive decimal with at most two places, as a string or number
    #[schema(value_type = String)]
    pub quantity: Quantity,
    /// One of ml, mg, oz, l, gm
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub units_of_measurement: Option<Unit>,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{recipe_id}/ingredients",
    tag = "ingredients",
    params(("recipe_id" = Uuid, Path, description = "Recipe ID")),
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 400, description = "Invalid quantity or unit, or duplicate name", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the recipe author can add ingredients", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_ingredient(
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(recipe_id): ApiPath<PathId>,
    body: Result<ApiJson<CreateIngredientRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    caller.authorize(Policy::OwnerOrReadOnly(recipe.author_id), Operation::Create)?;

    let ApiJson(request) = body?;
    let name = normalize_name(&request.name)?;
    ensure_unique_name(&mut conn, recipe.id, &name.name, None)?;

    let ingredient: Ingredient = diesel::insert_into(ingredients::table)
        .values(NewIngredient {
            recipe_id: recipe.id,
            name: &name.name,
            slug: &name.slug,
            quantity: request.quantity.hundredths(),
            units_of_measurement: request.units_of_measurement.map(Unit::code),
        })
        .returning(Ingredient::as_returning())
        .get_result(&mut conn)
        .map_err(|e| map_write_error(e, Some(&name.name)))?;

    Ok((
        StatusCode::CREATED,
        Json(IngredientResponse::new(ingredient, &recipe)?),
    ))
}
