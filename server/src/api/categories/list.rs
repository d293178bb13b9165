use super::CategoryResponse;
use crate::api::{ApiError, ApiQuery, ListParams};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::Category;
use crate::schema::categories;
use axum::{extract::State, Json};
use diesel::prelude::*;
use larder_core::{Direction, SortField};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Title,
    Slug,
}

impl SortField for CategoryField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(CategoryField::Title),
            "slug" => Some(CategoryField::Slug),
            _ => None,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    params(ListParams),
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryResponse>)
    )
)]
pub async fn list_categories(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let mut conn = pool.get()?;

    let mut query = categories::table
        .select(Category::as_select())
        .into_boxed();

    for pattern in params.search_patterns() {
        query = query.filter(
            categories::title
                .ilike(pattern.clone())
                .or(categories::slug.ilike(pattern)),
        );
    }

    for term in params.ordering::<CategoryField>() {
        query = match (term.field, term.direction) {
            (CategoryField::Title, Direction::Asc) => query.then_order_by(categories::title.asc()),
            (CategoryField::Title, Direction::Desc) => {
                query.then_order_by(categories::title.desc())
            }
            (CategoryField::Slug, Direction::Asc) => query.then_order_by(categories::slug.asc()),
            (CategoryField::Slug, Direction::Desc) => query.then_order_by(categories::slug.desc()),
        };
    }

    let rows: Vec<Category> = query
        .then_order_by(categories::title.asc())
        .load(&mut conn)?;

    Ok(Json(rows.into_iter().map(CategoryResponse::from).collect()))
}
