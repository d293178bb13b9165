use super::{find_rating, RatingResponse};
use crate::api::recipes::parent_recipe;
use crate::api::{require_on_put, ApiError, ApiJson, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::schema::ratings;
use axum::{extract::State, http::Method, Json};
use chrono::Utc;
use diesel::prelude::*;
use larder_core::{validate_rating, Operation, Policy};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRatingRequest {
    pub value: Option<i64>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{recipe_id}/ratings/{id}",
    tag = "ratings",
    params(
        ("recipe_id" = Uuid, Path, description = "Recipe ID"),
        ("id" = Uuid, Path, description = "Rating ID")
    ),
    request_body = UpdateRatingRequest,
    responses(
        (status = 200, description = "Rating updated", body = RatingResponse),
        (status = 400, description = "Value outside 0 to 10", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the rating author can change it", body = ErrorResponse),
        (status = 404, description = "Recipe or rating not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_rating(
    method: Method,
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath((recipe_id, id)): ApiPath<(PathId, PathId)>,
    body: Result<ApiJson<UpdateRatingRequest>, ApiError>,
) -> Result<Json<RatingResponse>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    caller.authorize(Policy::AuthenticatedOrReadOnly, Operation::Update)?;
    let (rating, author_name) = find_rating(&mut conn, recipe.id, &id)?;
    caller.authorize(Policy::OwnerOrReadOnly(rating.author_id), Operation::Update)?;
    let id = rating.id;

    let ApiJson(request) = body?;

    require_on_put(&method, "value", &request.value)?;
    let Some(value) = request.value else {
        return Ok(Json(RatingResponse::new(rating, author_name, &recipe)));
    };
    let value = validate_rating(value)?;

    diesel::update(ratings::table.find(id))
        .set((ratings::value.eq(value), ratings::updated.eq(Utc::now())))
        .execute(&mut conn)?;

    let (rating, author_name) = find_rating(&mut conn, recipe.id, &id.into())?;
    Ok(Json(RatingResponse::new(rating, author_name, &recipe)))
}
