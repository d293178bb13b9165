use super::{find_rating, RatingResponse, DUPLICATE_RATING};
use crate::api::recipes::parent_recipe;
use crate::api::{is_unique_violation, ApiError, ApiJson, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::NewRating;
use crate::schema::ratings;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use larder_core::{validate_rating, Operation, Policy};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRatingRequest {
    /// Whole number from 0 to 10
    pub value: i64,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{recipe_id}/ratings",
    tag = "ratings",
    params(("recipe_id" = Uuid, Path, description = "Recipe ID")),
    request_body = CreateRatingRequest,
    responses(
        (status = 201, description = "Rating created", body = RatingResponse),
        (status = 400, description = "Value outside 0 to 10", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "The caller already rated this recipe", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_rating(
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(recipe_id): ApiPath<PathId>,
    body: Result<ApiJson<CreateRatingRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    caller.authorize(Policy::AuthenticatedOrReadOnly, Operation::Create)?;
    let user = caller.into_user()?;
    let recipe_id = recipe.id;

    let ApiJson(request) = body?;

    let value = validate_rating(request.value)?;

    let existing: i64 = ratings::table
        .filter(ratings::recipe_id.eq(recipe_id))
        .filter(ratings::author_id.eq(user.id))
        .count()
        .get_result(&mut conn)?;
    if existing > 0 {
        return Err(ApiError::Conflict(DUPLICATE_RATING.to_string()));
    }

    let rating_id: Uuid = diesel::insert_into(ratings::table)
        .values(NewRating {
            recipe_id,
            author_id: user.id,
            value,
        })
        .returning(ratings::id)
        .get_result(&mut conn)
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict(DUPLICATE_RATING.to_string())
            } else {
                e.into()
            }
        })?;

    let (rating, author_name) = find_rating(&mut conn, recipe_id, &rating_id.into())?;
    Ok((
        StatusCode::CREATED,
        Json(RatingResponse::new(rating, author_name, &recipe)),
    ))
}
