use super::RatingResponse;
use crate::api::recipes::parent_recipe;
use crate::api::{ApiError, ApiPath, ApiQuery, ErrorResponse, ListParams, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::Rating;
use crate::schema::{ratings, users};
use axum::{extract::State, Json};
use diesel::prelude::*;
use larder_core::{Direction, SortField};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingField {
    AuthorUsername,
    Value,
    Published,
}

impl SortField for RatingField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "author__username" => Some(RatingField::AuthorUsername),
            "value" => Some(RatingField::Value),
            "published" => Some(RatingField::Published),
            _ => None,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{recipe_id}/ratings",
    tag = "ratings",
    params(("recipe_id" = Uuid, Path, description = "Recipe ID"), ListParams),
    responses(
        (status = 200, description = "Ratings of the recipe, newest first", body = Vec<RatingResponse>),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn list_ratings(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(recipe_id): ApiPath<PathId>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<RatingResponse>>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;

    let mut query = ratings::table
        .inner_join(users::table)
        .filter(ratings::recipe_id.eq(recipe.id))
        .select((Rating::as_select(), users::username))
        .into_boxed();

    for pattern in params.search_patterns() {
        query = query.filter(users::username.ilike(pattern));
    }

    for term in params.ordering::<RatingField>() {
        query = match (term.field, term.direction) {
            (RatingField::AuthorUsername, Direction::Asc) => {
                query.then_order_by(users::username.asc())
            }
            (RatingField::AuthorUsername, Direction::Desc) => {
                query.then_order_by(users::username.desc())
            }
            (RatingField::Value, Direction::Asc) => query.then_order_by(ratings::value.asc()),
            (RatingField::Value, Direction::Desc) => query.then_order_by(ratings::value.desc()),
            (RatingField::Published, Direction::Asc) => {
                query.then_order_by(ratings::published.asc())
            }
            (RatingField::Published, Direction::Desc) => {
                query.then_order_by(ratings::published.desc())
            }
        };
    }

    let rows: Vec<(Rating, String)> = query
        .then_order_by(ratings::published.desc())
        .load(&mut conn)?;

    Ok(Json(
        rows.into_iter()
            .map(|(rating, author_name)| RatingResponse::new(rating, author_name, &recipe))
            .collect(),
    ))
}
