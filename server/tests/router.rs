//! Routing, authentication and validation behavior that is decided before
//! any database access. The pool points at an unreachable server, so these
//! run without Postgres.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use larder_server::{app, db};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    app(Arc::new(db::lazy_pool("postgres://larder@127.0.0.1:1/larder")))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = test_app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_unauthed_ping() {
    let request = Request::get("/api/test/unauthed-ping")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "unauthed-ping"}));
}

#[tokio::test]
async fn test_anonymous_category_create_is_unauthorized() {
    let request = json_request(
        Method::POST,
        "/api/categories",
        json!({"title": "Soups", "slug": "soups"}),
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication credentials were not provided");
}

#[tokio::test]
async fn test_anonymous_category_delete_is_unauthorized() {
    let request = Request::delete(format!("/api/categories/{}", uuid::Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_anonymous_recipe_update_is_unauthorized() {
    let request = json_request(
        Method::PATCH,
        &format!("/api/recipes/{}", uuid::Uuid::new_v4()),
        json!({"title": "Stew"}),
    );
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let request = Request::get("/api/categories")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid Authorization header format");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::post("/api/auth/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"username\": "))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_anonymous_malformed_body_is_unauthorized() {
    let request = Request::post("/api/categories")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication credentials were not provided");
}

#[tokio::test]
async fn test_anonymous_missing_body_is_unauthorized() {
    let request = Request::post("/api/categories").body(Body::empty()).unwrap();
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_anonymous_delete_with_malformed_id_is_unauthorized() {
    let request = Request::delete("/api/categories/x")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication credentials were not provided");
}

#[tokio::test]
async fn test_me_requires_authentication() {
    let request = Request::get("/api/users/me").body(Body::empty()).unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing Authorization header");
}

#[tokio::test]
async fn test_invalid_path_id_is_rejected() {
    let request = Request::get("/api/recipes/not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Recipe with id not-a-uuid was not found.");
}

#[tokio::test]
async fn test_invalid_query_is_json_error() {
    let request = Request::get("/api/recipes?search=soup&search=stew")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_route() {
    let request = Request::get("/api/pantry").body(Body::empty()).unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found.");
}

#[tokio::test]
async fn test_wrong_method_is_json_error() {
    let request = Request::delete("/api/test/unauthed-ping")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method \"DELETE\" not allowed.");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let request = Request::get("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/recipes/{recipe_id}/ratings"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}
