pub mod authors;
pub mod categories;
pub mod error;
pub mod extract;
pub mod images;
pub mod ingredients;
pub mod links;
pub mod listing;
pub mod public;
pub mod ratings;
pub mod recipes;
pub mod reviews;
pub mod upload;
pub mod users;

pub use error::{is_foreign_key_violation, is_unique_violation, ApiError, ErrorResponse};
pub use extract::{ApiJson, ApiPath, ApiQuery, PathId};
pub use listing::ListParams;

use axum::http::Method;
use serde::{Deserialize, Deserializer};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

/// PUT replaces the whole resource, so every writable field must be present.
pub fn require_on_put<T>(
    method: &Method,
    field: &'static str,
    value: &Option<T>,
) -> Result<(), ApiError> {
    if *method == Method::PUT && value.is_none() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

/// Deserialize a field where absent and `null` mean different things: use
/// with `#[serde(default)]` so absent is `None` and `null` is `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Fallback for paths no router matches.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found.".to_string())
}

/// Fallback for a known path requested with a method it does not support.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method.to_string())
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(
        info(title = "larder", description = "Recipe sharing API"),
        components(schemas(ErrorResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        public::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
        authors::ApiDoc::openapi(),
        categories::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
        images::ApiDoc::openapi(),
        reviews::ApiDoc::openapi(),
        ratings::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        unit: Option<Option<String>>,
    }

    #[test]
    fn test_double_option() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.unit, None);
        let null: Patch = serde_json::from_str(r#"{"unit": null}"#).unwrap();
        assert_eq!(null.unit, Some(None));
        let set: Patch = serde_json::from_str(r#"{"unit": "gm"}"#).unwrap();
        assert_eq!(set.unit, Some(Some("gm".to_string())));
    }

    #[test]
    fn test_require_on_put() {
        let missing: Option<String> = None;
        assert!(require_on_put(&Method::PUT, "title", &missing).is_err());
        assert!(require_on_put(&Method::PATCH, "title", &missing).is_ok());
        assert!(require_on_put(&Method::PUT, "title", &Some(1)).is_ok());
    }

    #[test]
    fn test_openapi_covers_nested_routes() {
        let spec = openapi();
        for path in [
            "/api/categories/{id}/recipes",
            "/api/recipes/{recipe_id}/average-rating",
            "/api/recipes/{recipe_id}/ingredients/{id}",
            "/api/recipes/{recipe_id}/images/{id}/file",
            "/api/recipes/{recipe_id}/reviews",
            "/api/recipes/{recipe_id}/ratings/{id}",
            "/api/authors/{id}/image",
            "/api/users/me",
            "/api/auth/signup",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
