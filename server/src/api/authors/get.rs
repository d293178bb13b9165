use super::{find_author, AuthorResponse};
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use axum::{extract::State, Json};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn get_author(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(id): ApiPath<PathId>,
) -> Result<Json<AuthorResponse>, ApiError> {
    let mut conn = pool.get()?;
    Ok(Json(find_author(&mut conn, &id)?.into()))
}
