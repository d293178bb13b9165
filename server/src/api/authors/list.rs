use super::AuthorResponse;
use crate::api::{ApiError, ApiQuery, ListParams};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, Json};
use diesel::prelude::*;
use larder_core::{Direction, SortField};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorField {
    Username,
}

impl SortField for AuthorField {
    fn from_name(name: &str) -> Option<Self> {
        (name == "username").then_some(AuthorField::Username)
    }
}

#[utoipa::path(
    get,
    path = "/api/authors",
    tag = "authors",
    params(ListParams),
    responses(
        (status = 200, description = "All non-admin users", body = Vec<AuthorResponse>)
    )
)]
pub async fn list_authors(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<AuthorResponse>>, ApiError> {
    let mut conn = pool.get()?;

    let mut query = users::table
        .filter(users::is_superuser.eq(false))
        .select(User::as_select())
        .into_boxed();

    for pattern in params.search_patterns() {
        query = query.filter(users::username.ilike(pattern));
    }

    for term in params.ordering::<AuthorField>() {
        query = match term.direction {
            Direction::Asc => query.then_order_by(users::username.asc()),
            Direction::Desc => query.then_order_by(users::username.desc()),
        };
    }

    let rows: Vec<User> = query
        .then_order_by(users::username.asc())
        .load(&mut conn)?;

    Ok(Json(rows.into_iter().map(AuthorResponse::from).collect()))
}
