use super::ReviewResponse;
use crate::api::recipes::parent_recipe;
use crate::api::{ApiError, ApiPath, ApiQuery, ErrorResponse, ListParams, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::Review;
use crate::schema::{reviews, users};
use axum::{extract::State, Json};
use diesel::prelude::*;
use larder_core::{Direction, SortField};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewField {
    AuthorUsername,
    Content,
    Published,
}

impl SortField for ReviewField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "author__username" => Some(ReviewField::AuthorUsername),
            "content" => Some(ReviewField::Content),
            "published" => Some(ReviewField::Published),
            _ => None,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{recipe_id}/reviews",
    tag = "reviews",
    params(("recipe_id" = Uuid, Path, description = "Recipe ID"), ListParams),
    responses(
        (status = 200, description = "Reviews of the recipe, newest first", body = Vec<ReviewResponse>),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn list_reviews(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(recipe_id): ApiPath<PathId>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;

    let mut query = reviews::table
        .inner_join(users::table)
        .filter(reviews::recipe_id.eq(recipe.id))
        .select((Review::as_select(), users::username))
        .into_boxed();

    for pattern in params.search_patterns() {
        query = query.filter(
            users::username
                .ilike(pattern.clone())
                .or(reviews::content.ilike(pattern)),
        );
    }

    for term in params.ordering::<ReviewField>() {
        query = match (term.field, term.direction) {
            (ReviewField::AuthorUsername, Direction::Asc) => {
                query.then_order_by(users::username.asc())
            }
            (ReviewField::AuthorUsername, Direction::Desc) => {
                query.then_order_by(users::username.desc())
            }
            (ReviewField::Content, Direction::Asc) => query.then_order_by(reviews::content.asc()),
            (ReviewField::Content, Direction::Desc) => {
                query.then_order_by(reviews::content.desc())
            }
            (ReviewField::Published, Direction::Asc) => {
                query.then_order_by(reviews::published.asc())
            }
            (ReviewField::Published, Direction::Desc) => {
                query.then_order_by(reviews::published.desc())
            }
        };
    }

    let rows: Vec<(Review, String)> = query
        .then_order_by(reviews::published.desc())
        .load(&mut conn)?;

    Ok(Json(
        rows.into_iter()
            .map(|(review, author_name)| ReviewResponse::new(review, author_name, &recipe))
            .collect(),
    ))
}
