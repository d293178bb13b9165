pub mod average_rating;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::api::{links, ApiError, PathId};
use crate::models::Recipe;
use crate::schema::recipes;
use crate::AppState;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub url: String,
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub instructions: String,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub author_name: String,
    /// Link to the author
    pub author: String,
    pub category_title: String,
    /// Link to the category
    pub category: String,
    pub ingredients: String,
    pub images: String,
    pub reviews: String,
    pub ratings: String,
    pub average_rating: String,
}

impl RecipeResponse {
    pub fn new(recipe: Recipe, author_name: String, category_title: String) -> Self {
        let id = recipe.id;
        RecipeResponse {
            url: links::recipe(id),
            id,
            title: recipe.title,
            slug: recipe.slug,
            instructions: recipe.instructions,
            published: recipe.published,
            updated: recipe.updated,
            author_name,
            author: links::author(recipe.author_id),
            category_title,
            category: links::category(recipe.category_id),
            ingredients: links::ingredients(id),
            images: links::images(id),
            reviews: links::reviews(id),
            ratings: links::ratings(id),
            average_rating: links::recipe_average_rating(id),
        }
    }
}

/// The recipe a nested resource belongs to.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ParentRecipe {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
}

/// The recipe named in the URL, or 404 when it doesn't exist. Every nested
/// resource starts with this lookup.
pub fn parent_recipe(
    conn: &mut PgConnection,
    recipe_id: &PathId,
) -> Result<ParentRecipe, ApiError> {
    let id = recipe_id.resolve(|raw| ApiError::recipe_not_found(raw))?;
    recipes::table
        .find(id)
        .select(ParentRecipe::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| ApiError::recipe_not_found(id))
}

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{recipe_id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .patch(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route(
            "/{recipe_id}/average-rating",
            get(average_rating::get_average_rating),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        average_rating::get_average_rating,
    ),
    components(schemas(
        RecipeResponse,
        create::CreateRecipeRequest,
        update::UpdateRecipeRequest,
        average_rating::AverageRatingResponse,
    ))
)]
pub struct ApiDoc;
