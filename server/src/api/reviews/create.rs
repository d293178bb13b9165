use super::{find_review, ReviewResponse, DUPLICATE_REVIEW};
use crate::api::recipes::parent_recipe;
use crate::api::{is_unique_violation, ApiError, ApiJson, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::NewReview;
use crate::schema::reviews;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use larder_core::{require_text, Operation, Policy};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub content: String,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{recipe_id}/reviews",
    tag = "reviews",
    params(("recipe_id" = Uuid, Path, description = "Recipe ID")),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Empty content", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "The caller already reviewed this recipe", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_review(
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(recipe_id): ApiPath<PathId>,
    body: Result<ApiJson<CreateReviewRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &recipe_id)?;
    caller.authorize(Policy::AuthenticatedOrReadOnly, Operation::Create)?;
    let user = caller.into_user()?;
    let recipe_id = recipe.id;

    let ApiJson(request) = body?;

    let content = require_text("Content", &request.content, None)?;

    let existing: i64 = reviews::table
        .filter(reviews::recipe_id.eq(recipe_id))
        .filter(reviews::author_id.eq(user.id))
        .count()
        .get_result(&mut conn)?;
    if existing > 0 {
        return Err(ApiError::Conflict(DUPLICATE_REVIEW.to_string()));
    }

    let review_id: Uuid = diesel::insert_into(reviews::table)
        .values(NewReview {
            recipe_id,
            author_id: user.id,
            content: &content,
        })
        .returning(reviews::id)
        .get_result(&mut conn)
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict(DUPLICATE_REVIEW.to_string())
            } else {
                e.into()
            }
        })?;

    let (review, author_name) = find_review(&mut conn, recipe_id, &review_id.into())?;
    Ok((
        StatusCode::CREATED,
        Json(ReviewResponse::new(review, author_name, &recipe)),
    ))
}
