pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::api::recipes::ParentRecipe;
use crate::api::{links, ApiError, PathId};
use crate::models::Rating;
use crate::schema::{ratings, users};
use crate::AppState;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

pub const DUPLICATE_RATING: &str = "User can only have one rating for each recipe.";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RatingResponse {
    pub url: String,
    pub id: Uuid,
    /// Link to the recipe
    pub recipe: String,
    pub recipe_title: String,
    /// Link to the author
    pub author: String,
    pub author_name: String,
    /// 0 to 10
    pub value: i16,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl RatingResponse {
    pub fn new(rating: Rating, author_name: String, recipe: &ParentRecipe) -> Self {
        RatingResponse {
            url: links::rating(rating.recipe_id, rating.id),
            id: rating.id,
            recipe: links::recipe(rating.recipe_id),
            recipe_title: recipe.title.clone(),
            author: links::author(rating.author_id),
            author_name,
            value: rating.value,
            published: rating.published,
            updated: rating.updated,
        }
    }
}

pub fn rating_not_found(id: impl std::fmt::Display) -> ApiError {
    ApiError::NotFound(format!("Rating with id {} was not found.", id))
}

/// Rating with its author's username, scoped to the recipe.
pub fn find_rating(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    id: &PathId,
) -> Result<(Rating, String), ApiError> {
    let id = id.resolve(|raw| rating_not_found(raw))?;
    ratings::table
        .inner_join(users::table)
        .filter(ratings::recipe_id.eq(recipe_id))
        .filter(ratings::id.eq(id))
        .select((Rating::as_select(), users::username))
        .first(conn)
        .optional()?
        .ok_or_else(|| rating_not_found(id))
}

/// Returns the router for rating endpoints
/// (mounted at /api/recipes/{recipe_id}/ratings)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_ratings).post(create::create_rating))
        .route(
            "/{id}",
            get(get::get_rating)
                .put(update::update_rating)
                .patch(update::update_rating)
                .delete(delete::delete_rating),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_ratings,
        create::create_rating,
        get::get_rating,
        update::update_rating,
        delete::delete_rating,
    ),
    components(schemas(
        RatingResponse,
        create::CreateRatingRequest,
        update::UpdateRatingRequest,
    ))
)]
pub struct ApiDoc;
