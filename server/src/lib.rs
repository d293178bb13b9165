pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod models;
pub mod raw_sql;
pub mod schema;
pub mod telemetry;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
pub type AppState = Arc<db::DbPool>;

/// The full application: every API router, Swagger UI and request tracing.
pub fn app(pool: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .merge(api::public::router())
        .nest("/api/users", api::users::router())
        .nest("/api/authors", api::authors::router())
        .nest("/api/categories", api::categories::router())
        .nest("/api/recipes", api::recipes::router())
        .nest(
            "/api/recipes/{recipe_id}/ingredients",
            api::ingredients::router(),
        )
        .nest("/api/recipes/{recipe_id}/images", api::images::router())
        .nest("/api/recipes/{recipe_id}/reviews", api::reviews::router())
        .nest("/api/recipes/{recipe_id}/ratings", api::ratings::router())
        .merge(swagger_ui)
        .method_not_allowed_fallback(api::method_not_allowed)
        .fallback(api::not_found)
        .with_state(pool)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(telemetry::make_span)
                .on_response(telemetry::on_response)
                .on_failure(telemetry::on_failure),
        )
}
