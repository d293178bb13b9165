use crate::api::{links, ErrorResponse};
use crate::auth::AuthUser;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MeResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Link to the profile image, if one was uploaded
    pub image: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    responses(
        (status = 200, description = "The authenticated user", body = MeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.id,
        image: user
            .image_content_type
            .as_ref()
            .map(|_| links::author_image(user.id)),
        username: user.username,
        email: user.email,
    })
}
