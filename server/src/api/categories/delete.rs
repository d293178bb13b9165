use super::get::{category_not_found, find_category};
use crate::api::{is_foreign_key_violation, ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::schema::{categories, recipes};
use axum::{extract::State, http::StatusCode};
use diesel::prelude::*;
use larder_core::{Operation, Policy};
use std::sync::Arc;
use uuid::Uuid;

const CATEGORY_IN_USE: &str = "Category has recipes associated with it, cannot be deleted.";

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only administrators can delete categories", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Category still has recipes", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category(
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(id): ApiPath<PathId>,
) -> Result<StatusCode, ApiError> {
    caller.authorize(Policy::AdminOrReadOnly, Operation::Delete)?;

    let id = id.resolve(|raw| category_not_found(raw))?;
    let mut conn = pool.get()?;
    find_category(&mut conn, id)?;

    let in_use: i64 = recipes::table
        .filter(recipes::category_id.eq(id))
        .count()
        .get_result(&mut conn)?;
    if in_use > 0 {
        return Err(ApiError::Conflict(CATEGORY_IN_USE.to_string()));
    }

    // A recipe created since the count still trips the foreign key
    diesel::delete(categories::table.find(id))
        .execute(&mut conn)
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                ApiError::Conflict(CATEGORY_IN_USE.to_string())
            } else {
                e.into()
            }
        })?;

    tracing::info!(category_id = %id, "category deleted");

    Ok(StatusCode::NO_CONTENT)
}
