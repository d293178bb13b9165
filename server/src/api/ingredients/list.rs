use super::IngredientResponse;
use crate::api::recipes::parent_recipe;
use crate::api::{ApiError, ApiPath, ApiQuery, ErrorResponse, ListParams, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::Ingredient;
use crate::schema::ingredients;
use axum::{extract::State, Json};
use diesel::prelude::*;
use larder_core::{Direction, SortField};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientField {
    Name,
    Slug,
}

impl SortField for IngredientField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(IngredientField::Name),
            "slug" => Some(IngredientField::Slug),
            _ => None,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{recipe_id}/ingredients",
    tag = "ingredients",
    params(("recipe_id" = Uuid, Path, description = "Recipe ID"), ListParams),
    responses(
        (status = 200, description = "Ingredients of the recipe", body = Vec<IngredientResponse>),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn list_ingredients(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(recipe_id): ApiPath<PathId>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<IngredientResponse>>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;

    let mut query = ingredients::table
        .filter(ingredients::recipe_id.eq(recipe.id))
        .select(Ingredient::as_select())
        .into_boxed();

    for pattern in params.search_patterns() {
        query = query.filter(
            ingredients::name
                .ilike(pattern.clone())
                .or(ingredients::slug.ilike(pattern)),
        );
    }

    for term in params.ordering::<IngredientField>() {
        query = match (term.field, term.direction) {
            (IngredientField::Name, Direction::Asc) => query.then_order_by(ingredients::name.asc()),
            (IngredientField::Name, Direction::Desc) => {
                query.then_order_by(ingredients::name.desc())
            }
            (IngredientField::Slug, Direction::Asc) => query.then_order_by(ingredients::slug.asc()),
            (IngredientField::Slug, Direction::Desc) => {
                query.then_order_by(ingredients::slug.desc())
            }
        };
    }

    let rows: Vec<Ingredient> = query
        .then_order_by(ingredients::name.asc())
        .load(&mut conn)?;

    let ingredients = rows
        .into_iter()
        .map(|row| IngredientResponse::new(row, &recipe))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ingredients))
}
