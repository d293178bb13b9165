use super::ImageResponse;
use crate::api::recipes::parent_recipe;
use crate::api::upload::read_image_field;
use crate::api::{ApiError, ApiPath, ErrorResponse, PathId};
use crate::auth::MaybeUser;
use crate::db::DbPool;
use crate::models::{NewRecipeImage, RecipeImage};
use crate::schema::{recipe_images, recipes};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use larder_core::{ensure_image_slot, validate_image, Operation, Policy, MAX_RECIPE_IMAGE_SIZE};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadImageRequest {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{recipe_id}/images",
    tag = "images",
    params(("recipe_id" = Uuid, Path, description = "Recipe ID")),
    request_body(content_type = "multipart/form-data", content = UploadImageRequest),
    responses(
        (status = 201, description = "Image uploaded", body = ImageResponse),
        (status = 400, description = "Too many images, too large, or not an image", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the recipe author can add images", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_image(
    caller: MaybeUser,
    State(pool): State<Arc<DbPool>>,
    ApiPath(recipe_id): ApiPath<PathId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let recipe = {
        let mut conn = pool.get()?;
        let recipe = parent_recipe(&mut conn, &recipe_id)?;
        caller.authorize(Policy::OwnerOrReadOnly(recipe.author_id), Operation::Create)?;
        recipe
    };
    let recipe_id = recipe.id;

    let mut multipart = multipart?;
    let data = read_image_field(&mut multipart, MAX_RECIPE_IMAGE_SIZE).await?;
    let content_type = validate_image(&data, MAX_RECIPE_IMAGE_SIZE)?;

    let mut conn = pool.get()?;
    let image = conn.transaction::<_, ApiError, _>(|conn| {
        // Lock the recipe so concurrent uploads can't both pass the count
        recipes::table
            .find(recipe_id)
            .select(recipes::id)
            .for_update()
            .first::<Uuid>(conn)
            .optional()?
            .ok_or_else(|| ApiError::recipe_not_found(recipe_id))?;

        let existing: i64 = recipe_images::table
            .filter(recipe_images::recipe_id.eq(recipe_id))
            .count()
            .get_result(conn)?;
        ensure_image_slot(existing)?;

        Ok(diesel::insert_into(recipe_images::table)
            .values(NewRecipeImage {
                recipe_id,
                content_type: &content_type,
                data: &data,
            })
            .returning(RecipeImage::as_returning())
            .get_result(conn)?)
    })?;

    tracing::info!(recipe_id = %recipe_id, image_id = %image.id, "recipe image uploaded");

    Ok((StatusCode::CREATED, Json(ImageResponse::new(image, &recipe))))
}
