use super::parent_recipe;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::raw_sql;
use crate::schema::ratings;
use axum::{extract::State, Json};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AverageRatingResponse {
    /// Mean of all rating values, null when the recipe has no ratings
    pub avg_rating: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{recipe_id}/average-rating",
    tag = "recipes",
    params(("recipe_id" = Uuid, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Average rating", body = AverageRatingResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_average_rating(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(id): ApiPath<PathId>,
) -> Result<Json<AverageRatingResponse>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = parent_recipe(&mut conn, &id)?;

    let avg_rating: Option<f64> = ratings::table
        .filter(ratings::recipe_id.eq(recipe.id))
        .select(raw_sql::avg_rating())
        .first(&mut conn)?;

    Ok(Json(AverageRatingResponse { avg_rating }))
}
