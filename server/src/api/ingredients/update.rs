use super::{ensure_unique_name, find_ingredient, map_write_error, IngredientResponse};
use crate::api::recipes::parent_recipe;
use crate::api::{
    double_option, require_on_put, ApiError, ApiJson, ApiPath, ErrorResponse, PathId,
};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::{Ingredient, IngredientChanges};
use crate::schema::ingredients;
use axum::{extract::State, http::Method, Json};
use diesel::prelude::*;
use larder_core::{normalize_name, Operation, Policy, Quantity, Unit};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// PUT requires `name` and `quantity`, PATCH accepts any subset. An explicit
/// `null` unit clears it.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateIngredientRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub quantity: Option<Quantity>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub units_of_measurement: Option<Option<Unit>>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{recipe_id}/ingredients/{id}",
    tag = "ingredients",
    params(
        ("recipe_id" = Uuid, Path, description = "Recipe ID"),
        ("id" = Uuid, Path, description = "Ingredient ID")
    ),
    request_body = UpdateIngredientRequest,
    responses(
        (status = 200, description = "Ingredient updated", body = IngredientResponse),
        (status = 400, description = "Invalid quantity or unit, or duplicate name", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the recipe author can edit ingredients", body = ErrorResponse),
        (status = 404, description = "Recipe or ingredient not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_ingredient(
    method: Method,
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath((recipe_id, id)): ApiPath<(PathId, PathId)>,
    body: Result<ApiJson<UpdateIngredientRequest>, ApiError>,
) -> Result<Json<IngredientResponse>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    caller.authorize(Policy::OwnerOrReadOnly(recipe.author_id), Operation::Update)?;
    let existing = find_ingredient(&mut conn, recipe.id, &id)?;
    let id = existing.id;

    let ApiJson(request) = body?;

    require_on_put(&method, "name", &request.name)?;
    require_on_put(&method, "quantity", &request.quantity)?;

    let name = request.name.as_deref().map(normalize_name).transpose()?;
    if let Some(name) = &name {
        ensure_unique_name(&mut conn, recipe.id, &name.name, Some(id))?;
    }

    // PUT without a unit clears it
    let unit = match (&method, request.units_of_measurement) {
        (&Method::PUT, None) => Some(None),
        (_, unit) => unit,
    };

    if name.is_none() && request.quantity.is_none() && unit.is_none() {
        return Ok(Json(IngredientResponse::new(existing, &recipe)?));
    }

    let ingredient: Ingredient = diesel::update(ingredients::table.find(id))
        .set(IngredientChanges {
            name: name.as_ref().map(|n| n.name.as_str()),
            slug: name.as_ref().map(|n| n.slug.as_str()),
            quantity: request.quantity.map(Quantity::hundredths),
            units_of_measurement: unit.map(|u| u.map(Unit::code)),
        })
        .returning(Ingredient::as_returning())
        .get_result(&mut conn)
        .map_err(|e| map_write_error(e, name.as_ref().map(|n| n.name.as_str())))?;

    Ok(Json(IngredientResponse::new(ingredient, &recipe)?))
}
