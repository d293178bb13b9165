use super::RecipeResponse;
use crate::api::{ApiError, ApiQuery, ListParams};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::Recipe;
use crate::schema::{categories, recipes, users};
use axum::{extract::State, Json};
use diesel::prelude::*;
use larder_core::{Direction, SortField};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeField {
    Title,
    Slug,
    CategoryTitle,
    AuthorUsername,
}

impl SortField for RecipeField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(RecipeField::Title),
            "slug" => Some(RecipeField::Slug),
            "category__title" => Some(RecipeField::CategoryTitle),
            "author__username" => Some(RecipeField::AuthorUsername),
            _ => None,
        }
    }
}

/// Which recipes a listing covers.
#[derive(Debug, Clone, Copy)]
pub enum RecipeScope {
    All,
    Category(Uuid),
    Author(Uuid),
    Single(Uuid),
}

/// Load recipes with their author name and category title, applying the
/// list parameters. Recipes are ordered by title after any requested
/// ordering.
pub fn load_recipes(
    conn: &mut PgConnection,
    scope: RecipeScope,
    params: &ListParams,
) -> Result<Vec<RecipeResponse>, ApiError> {
    let mut query = recipes::table
        .inner_join(users::table)
        .inner_join(categories::table)
        .select((Recipe::as_select(), users::username, categories::title))
        .into_boxed();

    query = match scope {
        RecipeScope::All => query,
        RecipeScope::Category(id) => query.filter(recipes::category_id.eq(id)),
        RecipeScope::Author(id) => query.filter(recipes::author_id.eq(id)),
        RecipeScope::Single(id) => query.filter(recipes::id.eq(id)),
    };

    for pattern in params.search_patterns() {
        query = query.filter(
            recipes::title
                .ilike(pattern.clone())
                .or(recipes::slug.ilike(pattern.clone()))
                .or(recipes::instructions.ilike(pattern.clone()))
                .or(categories::title.ilike(pattern.clone()))
                .or(users::username.ilike(pattern)),
        );
    }

    for term in params.ordering::<RecipeField>() {
        query = match (term.field, term.direction) {
            (RecipeField::Title, Direction::Asc) => query.then_order_by(recipes::title.asc()),
            (RecipeField::Title, Direction::Desc) => query.then_order_by(recipes::title.desc()),
            (RecipeField::Slug, Direction::Asc) => query.then_order_by(recipes::slug.asc()),
            (RecipeField::Slug, Direction::Desc) => query.then_order_by(recipes::slug.desc()),
            (RecipeField::CategoryTitle, Direction::Asc) => {
                query.then_order_by(categories::title.asc())
            }
            (RecipeField::CategoryTitle, Direction::Desc) => {
                query.then_order_by(categories::title.desc())
            }
            (RecipeField::AuthorUsername, Direction::Asc) => {
                query.then_order_by(users::username.asc())
            }
            (RecipeField::AuthorUsername, Direction::Desc) => {
                query.then_order_by(users::username.desc())
            }
        };
    }

    let rows: Vec<(Recipe, String, String)> = query
        .then_order_by(recipes::title.asc())
        .then_order_by(recipes::id.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(recipe, author_name, category_title)| {
            RecipeResponse::new(recipe, author_name, category_title)
        })
        .collect())
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListParams),
    responses(
        (status = 200, description = "All recipes", body = Vec<RecipeResponse>)
    )
)]
pub async fn list_recipes(
    _caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let mut conn = pool.get()?;
    let recipes = load_recipes(&mut conn, RecipeScope::All, &params)?;
    Ok(Json(recipes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_field_names() {
        assert_eq!(
            RecipeField::from_name("category__title"),
            Some(RecipeField::CategoryTitle)
        );
        assert_eq!(
            RecipeField::from_name("author__username"),
            Some(RecipeField::AuthorUsername)
        );
        assert_eq!(RecipeField::from_name("category"), None);
    }
}
