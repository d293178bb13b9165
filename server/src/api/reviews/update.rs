use super::{find_review, ReviewResponse};
use crate::api::recipes::parent_recipe;
use crate::api::{require_on_put, ApiError, ApiJson, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::schema::reviews;
use axum::{extract::State, http::Method, Json};
use chrono::Utc;
use diesel::prelude::*;
use larder_core::{require_text, Operation, Policy};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    pub content: Option<String>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{recipe_id}/reviews/{id}",
    tag = "reviews",
    params(
        ("recipe_id" = Uuid, Path, description = "Recipe ID"),
        ("id" = Uuid, Path, description = "Review ID")
    ),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 400, description = "Empty content", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the review author can edit it", body = ErrorResponse),
        (status = 404, description = "Recipe or review not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_review(
    method: Method,
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath((recipe_id, id)): ApiPath<(PathId, PathId)>,
    body: Result<ApiJson<UpdateReviewRequest>, ApiError>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    caller.authorize(Policy::AuthenticatedOrReadOnly, Operation::Update)?;
    let (review, author_name) = find_review(&mut conn, recipe.id, &id)?;
    caller.authorize(Policy::OwnerOrReadOnly(review.author_id), Operation::Update)?;
    let id = review.id;

    let ApiJson(request) = body?;

    require_on_put(&method, "content", &request.content)?;
    let Some(content) = request.content else {
        return Ok(Json(ReviewResponse::new(review, author_name, &recipe)));
    };
    let content = require_text("Content", &content, None)?;

    diesel::update(reviews::table.find(id))
        .set((reviews::content.eq(content.as_str()), reviews::updated.eq(Utc::now())))
        .execute(&mut conn)?;

    let (review, author_name) = find_review(&mut conn, recipe.id, &id.into())?;
    Ok(Json(ReviewResponse::new(review, author_name, &recipe)))
}
