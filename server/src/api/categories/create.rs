use super::CategoryResponse;
use crate::api::{is_unique_violation, ApiError, ApiJson, ErrorResponse};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::{Category, NewCategory};
use crate::schema::categories;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use larder_core::{require_text, validate_slug, Operation, Policy, MAX_TITLE_LEN};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub title: String,
    pub slug: String,
}

/// A non-blank slug of letters, digits, hyphens and underscores.
pub fn category_slug(raw: &str) -> Result<String, ApiError> {
    let slug = require_text("Slug", raw, Some(MAX_TITLE_LEN))?;
    validate_slug(&slug)?;
    Ok(slug)
}

/// Reject a title or slug another category already uses. `exclude` skips
/// the category being updated.
pub fn ensure_unique(
    conn: &mut PgConnection,
    title: Option<&str>,
    slug: Option<&str>,
    exclude: Option<Uuid>,
) -> Result<(), ApiError> {
    let exclude = exclude.unwrap_or(Uuid::nil());

    if let Some(title) = title {
        let taken: i64 = categories::table
            .filter(categories::title.eq(title))
            .filter(categories::id.ne(exclude))
            .count()
            .get_result(conn)?;
        if taken > 0 {
            return Err(ApiError::BadRequest(
                "category with this title already exists.".to_string(),
            ));
        }
    }

    if let Some(slug) = slug {
        let taken: i64 = categories::table
            .filter(categories::slug.eq(slug))
            .filter(categories::id.ne(exclude))
            .count()
            .get_result(conn)?;
        if taken > 0 {
            return Err(ApiError::BadRequest(
                "category with this slug already exists.".to_string(),
            ));
        }
    }

    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid or duplicate title or slug", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only administrators can create categories", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    body: Result<ApiJson<CreateCategoryRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    caller.authorize(Policy::AdminOrReadOnly, Operation::Create)?;
    let ApiJson(request) = body?;

    let title = require_text("Title", &request.title, Some(MAX_TITLE_LEN))?;
    let slug = category_slug(&request.slug)?;

    let mut conn = pool.get()?;
    ensure_unique(&mut conn, Some(&title), Some(&slug), None)?;

    let category: Category = diesel::insert_into(categories::table)
        .values(NewCategory {
            title: &title,
            slug: &slug,
        })
        .returning(Category::as_returning())
        .get_result(&mut conn)
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::BadRequest("category with this title or slug already exists.".to_string())
            } else {
                e.into()
            }
        })?;

    tracing::info!(category_id = %category.id, "category created");

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_category_slug_trims() {
        assert_eq!(category_slug("  soups-and_stews ").unwrap(), "soups-and_stews");
    }

    #[test]
    fn test_category_slug_rejects_punctuation() {
        let err = category_slug("Soups & Stews!").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("Enter a valid slug"));
        assert!(category_slug("   ").is_err());
    }
}
