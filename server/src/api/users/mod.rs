pub mod image;
pub mod me;

use crate::AppState;
use axum::routing::{get, put};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/users endpoints (mounted at /api/users)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me::get_me))
        .route("/me/image", put(image::put_profile_image))
}

#[derive(OpenApi)]
#[openapi(
    paths(me::get_me, image::put_profile_image),
    components(schemas(me::MeResponse, image::ProfileImageRequest))
)]
pub struct ApiDoc;
