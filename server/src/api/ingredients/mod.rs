pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::api::recipes::ParentRecipe;
use crate::api::{is_unique_violation, links, ApiError, PathId};
use crate::models::Ingredient;
use crate::schema::ingredients;
use crate::AppState;
use axum::routing::get;
use axum::Router;
use diesel::prelude::*;
use larder_core::{describe, Quantity, Unit};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientResponse {
    pub url: String,
    pub id: Uuid,
    /// Link to the recipe
    pub recipe: String,
    pub recipe_title: String,
    pub name: String,
    pub slug: String,
    /// Decimal with two places, e.g. "100.00"
    #[schema(value_type = String)]
    pub quantity: Quantity,
    /// One of ml, mg, oz, l, gm
    #[schema(value_type = Option<String>)]
    pub units_of_measurement: Option<Unit>,
    /// e.g. "100.00 gm of cheese"
    pub ingredient_with_quantity: String,
}

impl IngredientResponse {
    pub fn new(row: Ingredient, recipe: &ParentRecipe) -> Result<Self, ApiError> {
        let quantity = Quantity::from_hundredths(row.quantity).map_err(|e| {
            ApiError::Internal(format!("Stored quantity of ingredient {}: {}", row.id, e))
        })?;
        let unit = row
            .units_of_measurement
            .as_deref()
            .map(str::parse::<Unit>)
            .transpose()
            .map_err(|e| {
                ApiError::Internal(format!("Stored unit of ingredient {}: {}", row.id, e))
            })?;

        Ok(IngredientResponse {
            url: links::ingredient(row.recipe_id, row.id),
            id: row.id,
            recipe: links::recipe(row.recipe_id),
            recipe_title: recipe.title.clone(),
            ingredient_with_quantity: describe(quantity, unit, &row.name),
            name: row.name,
            slug: row.slug,
            quantity,
            units_of_measurement: unit,
        })
    }
}

fn duplicate_name(name: &str) -> ApiError {
    ApiError::BadRequest(format!(
        "Ingredient with name '{}' already exists for this recipe.",
        name
    ))
}

/// Names are stored lowercased, so an exact comparison is case-insensitive.
pub fn ensure_unique_name(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    name: &str,
    exclude: Option<Uuid>,
) -> Result<(), ApiError> {
    let taken: i64 = ingredients::table
        .filter(ingredients::recipe_id.eq(recipe_id))
        .filter(ingredients::name.eq(name))
        .filter(ingredients::id.ne(exclude.unwrap_or(Uuid::nil())))
        .count()
        .get_result(conn)?;
    if taken > 0 {
        return Err(duplicate_name(name));
    }
    Ok(())
}

/// Map a write error, turning a concurrent duplicate into the same 400.
pub fn map_write_error(e: diesel::result::Error, name: Option<&str>) -> ApiError {
    match name {
        Some(name) if is_unique_violation(&e) => duplicate_name(name),
        _ => e.into(),
    }
}

fn ingredient_not_found(id: impl std::fmt::Display) -> ApiError {
    ApiError::NotFound(format!("Ingredient with id {} was not found.", id))
}

pub fn find_ingredient(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    id: &PathId,
) -> Result<Ingredient, ApiError> {
    let id = id.resolve(|raw| ingredient_not_found(raw))?;
    ingredients::table
        .filter(ingredients::recipe_id.eq(recipe_id))
        .filter(ingredients::id.eq(id))
        .select(Ingredient::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| ingredient_not_found(id))
}

/// Returns the router for ingredient endpoints
/// (mounted at /api/recipes/{recipe_id}/ingredients)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_ingredients).post(create::create_ingredient),
        )
        .route(
            "/{id}",
            get(get::get_ingredient)
                .put(update::update_ingredient)
                .patch(update::update_ingredient)
                .delete(delete::delete_ingredient),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_ingredients,
        create::create_ingredient,
        get::get_ingredient,
        update::update_ingredient,
        delete::delete_ingredient,
    ),
    components(schemas(
        IngredientResponse,
        create::CreateIngredientRequest,
        update::UpdateIngredientRequest,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> ParentRecipe {
        ParentRecipe {
            id: Uuid::from_u128(1),
            author_id: Uuid::from_u128(9),
            title: "Mac and cheese".to_string(),
        }
    }

    fn row(quantity: i32, unit: Option<&str>) -> Ingredient {
        Ingredient {
            id: Uuid::from_u128(2),
            recipe_id: Uuid::from_u128(1),
            name: "cheese".to_string(),
            slug: "cheese".to_string(),
            quantity,
            units_of_measurement: unit.map(str::to_string),
        }
    }

    #[test]
    fn test_response_with_unit() {
        let response = IngredientResponse::new(row(10000, Some("gm")), &recipe()).unwrap();
        assert_eq!(response.ingredient_with_quantity, "100.00 gm of cheese");
        assert_eq!(response.recipe_title, "Mac and cheese");
        assert_eq!(response.units_of_measurement, Some(Unit::Grams));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["quantity"], "100.00");
        assert_eq!(json["units_of_measurement"], "gm");
        assert_eq!(json["recipe"], format!("/api/recipes/{}", Uuid::from_u128(1)));
    }

    #[test]
    fn test_response_without_unit() {
        let response = IngredientResponse::new(row(200, None), &recipe()).unwrap();
        assert_eq!(response.ingredient_with_quantity, "2.00 cheese");
        assert!(response.url.ends_with(&format!("/ingredients/{}", Uuid::from_u128(2))));
    }

    #[test]
    fn test_corrupt_unit_is_internal() {
        let err = IngredientResponse::new(row(200, Some("cups")), &recipe()).unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
