pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod recipes;
pub mod update;

use crate::api::links;
use crate::models::Category;
use crate::AppState;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub url: String,
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    /// Link to the recipes in this category
    pub recipes: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            url: links::category(category.id),
            id: category.id,
            recipes: links::category_recipes(category.id),
            title: category.title,
            slug: category.slug,
        }
    }
}

/// Returns the router for /api/categories endpoints (mounted at /api/categories)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_categories).post(create::create_category),
        )
        .route(
            "/{id}",
            get(get::get_category)
                .put(update::update_category)
                .patch(update::update_category)
                .delete(delete::delete_category),
        )
        .route("/{id}/recipes", get(recipes::list_category_recipes))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_categories,
        create::create_category,
        get::get_category,
        update::update_category,
        delete::delete_category,
        recipes::list_category_recipes,
    ),
    components(schemas(
        CategoryResponse,
        create::CreateCategoryRequest,
        update::UpdateCategoryRequest,
    ))
)]
pub struct ApiDoc;
