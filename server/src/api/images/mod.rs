pub mod delete;
pub mod file;
pub mod get;
pub mod list;
pub mod upload;

use crate::api::recipes::ParentRecipe;
use crate::api::{links, ApiError, PathId};
use crate::models::RecipeImage;
use crate::schema::recipe_images;
use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use larder_core::MAX_RECIPE_IMAGE_SIZE;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Room for the multipart framing around a maximum size image.
const BODY_LIMIT: usize = MAX_RECIPE_IMAGE_SIZE + 64 * 1024;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImageResponse {
    pub url: String,
    pub id: Uuid,
    /// Link to the recipe
    pub recipe: String,
    pub recipe_title: String,
    pub content_type: String,
    /// Link to the image bytes
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl ImageResponse {
    pub fn new(image: RecipeImage, recipe: &ParentRecipe) -> Self {
        ImageResponse {
            url: links::image(image.recipe_id, image.id),
            id: image.id,
            recipe: links::recipe(image.recipe_id),
            recipe_title: recipe.title.clone(),
            content_type: image.content_type,
            image: links::image_file(image.recipe_id, image.id),
            created_at: image.created_at,
        }
    }
}

pub fn image_not_found(id: impl std::fmt::Display) -> ApiError {
    ApiError::NotFound(format!("Image with id {} was not found.", id))
}

pub fn find_image(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    id: &PathId,
) -> Result<RecipeImage, ApiError> {
    let id = id.resolve(|raw| image_not_found(raw))?;
    recipe_images::table
        .filter(recipe_images::recipe_id.eq(recipe_id))
        .filter(recipe_images::id.eq(id))
        .select(RecipeImage::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| image_not_found(id))
}

/// Returns the router for recipe image endpoints
/// (mounted at /api/recipes/{recipe_id}/images)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_images).post(upload::upload_image))
        .route("/{id}", get(get::get_image).delete(delete::delete_image))
        .route("/{id}/file", get(file::get_image_file))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_images,
        upload::upload_image,
        get::get_image,
        file::get_image_file,
        delete::delete_image,
    ),
    components(schemas(ImageResponse, upload::UploadImageRequest))
)]
pub struct ApiDoc;
