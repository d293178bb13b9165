pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::api::recipes::ParentRecipe;
use crate::api::{links, ApiError, PathId};
use crate::models::Review;
use crate::schema::{reviews, users};
use crate::AppState;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

pub const DUPLICATE_REVIEW: &str = "User can only have one review for each recipe.";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub url: String,
    pub id: Uuid,
    /// Link to the recipe
    pub recipe: String,
    pub recipe_title: String,
    /// Link to the author
    pub author: String,
    pub author_name: String,
    pub content: String,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl ReviewResponse {
    pub fn new(review: Review, author_name: String, recipe: &ParentRecipe) -> Self {
        ReviewResponse {
            url: links::review(review.recipe_id, review.id),
            id: review.id,
            recipe: links::recipe(review.recipe_id),
            recipe_title: recipe.title.clone(),
            author: links::author(review.author_id),
            author_name,
            content: review.content,
            published: review.published,
            updated: review.updated,
        }
    }
}

pub fn review_not_found(id: impl std::fmt::Display) -> ApiError {
    ApiError::NotFound(format!("Review with id {} was not found.", id))
}

/// Review with its author's username, scoped to the recipe.
pub fn find_review(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    id: &PathId,
) -> Result<(Review, String), ApiError> {
    let id = id.resolve(|raw| review_not_found(raw))?;
    reviews::table
        .inner_join(users::table)
        .filter(reviews::recipe_id.eq(recipe_id))
        .filter(reviews::id.eq(id))
        .select((Review::as_select(), users::username))
        .first(conn)
        .optional()?
        .ok_or_else(|| review_not_found(id))
}

/// Returns the router for review endpoints
/// (mounted at /api/recipes/{recipe_id}/reviews)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_reviews).post(create::create_review))
        .route(
            "/{id}",
            get(get::get_review)
                .put(update::update_review)
                .patch(update::update_review)
                .delete(delete::delete_review),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_reviews,
        create::create_review,
        get::get_review,
        update::update_review,
        delete::delete_review,
    ),
    components(schemas(
        ReviewResponse,
        create::CreateReviewRequest,
        update::UpdateReviewRequest,
    ))
)]
pub struct ApiDoc;
