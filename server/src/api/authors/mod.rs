pub mod get;
pub mod image;
pub mod list;
pub mod recipes;

use crate::api::{links, ApiError, PathId};
use crate::models::User;
use crate::schema::users;
use crate::AppState;
use axum::routing::get;
use axum::Router;
use diesel::prelude::*;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Public view of a user. Email and admin status are never exposed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorResponse {
    pub url: String,
    pub id: Uuid,
    pub username: String,
    /// Link to the author's recipes
    pub recipes: String,
    /// Link to the profile image, if one was uploaded
    pub image: Option<String>,
}

impl From<User> for AuthorResponse {
    fn from(user: User) -> Self {
        AuthorResponse {
            url: links::author(user.id),
            id: user.id,
            recipes: links::author_recipes(user.id),
            image: user
                .image_content_type
                .as_ref()
                .map(|_| links::author_image(user.id)),
            username: user.username,
        }
    }
}

pub fn author_not_found(id: impl std::fmt::Display) -> ApiError {
    ApiError::NotFound(format!("Author with id {} was not found.", id))
}

/// Non-admin user, or 404.
pub fn find_author(conn: &mut PgConnection, id: &PathId) -> Result<User, ApiError> {
    let id = id.resolve(|raw| author_not_found(raw))?;
    users::table
        .filter(users::id.eq(id))
        .filter(users::is_superuser.eq(false))
        .select(User::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| author_not_found(id))
}

/// Returns the router for /api/authors endpoints (mounted at /api/authors)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_authors))
        .route("/{id}", get(get::get_author))
        .route("/{id}/recipes", get(recipes::list_author_recipes))
        .route("/{id}/image", get(image::get_author_image))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_authors,
        get::get_author,
        recipes::list_author_recipes,
        image::get_author_image,
    ),
    components(schemas(AuthorResponse))
)]
pub struct ApiDoc;
