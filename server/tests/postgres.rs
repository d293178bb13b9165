//! Behavior that depends on the database: uniqueness, limits, foreign keys
//! and the order of lookups and permission checks on nested resources.
//!
//! These need a Postgres server and are skipped by default. Run them with
//! `DATABASE_URL=postgres://... cargo test -p larder-server --test postgres -- --ignored`.
//! Every test creates its own users, categories and recipes under unique
//! names, so they can share a database and run in parallel.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use larder_server::auth::{ensure_superuser, AdminSetupError};
use larder_server::config::AdminAccount;
use larder_server::{app, db, AppState};
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};
use tower::ServiceExt;
use uuid::Uuid;

const PASSWORD: &str = "password123";

fn pool() -> AppState {
    static POOL: OnceLock<AppState> = OnceLock::new();
    POOL.get_or_init(|| {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        Arc::new(db::create_pool(&url, 4).expect("database should be reachable"))
    })
    .clone()
}

fn unique(prefix: &str) -> String {
    format!("{}{}", prefix, &Uuid::new_v4().simple().to_string()[..10])
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app(pool()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn call(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    };
    send(request.unwrap()).await
}

async fn signup(username: &str) -> String {
    let (status, body) = call(
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["token"].as_str().unwrap().to_string()
}

async fn login(username: &str, password: &str) -> (StatusCode, Value) {
    call(
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": username, "password": password})),
    )
    .await
}

fn admin_account(username: &str) -> AdminAccount {
    AdminAccount {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: PASSWORD.to_string(),
    }
}

async fn admin_token() -> String {
    let username = unique("admin");
    let mut conn = pool().get().unwrap();
    let admin = ensure_superuser(&mut conn, &admin_account(&username)).unwrap();
    assert!(admin.is_superuser);
    let (status, body) = login(&username, PASSWORD).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["token"].as_str().unwrap().to_string()
}

async fn create_category(admin: &str) -> String {
    let title = unique("Soups ");
    let (status, body) = call(
        Method::POST,
        "/api/categories",
        Some(admin),
        Some(json!({"title": title, "slug": unique("soups-")})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_str().unwrap().to_string()
}

async fn create_recipe(token: &str, category: &str) -> (String, String) {
    let title = unique("Mac and cheese ");
    let (status, body) = call(
        Method::POST,
        "/api/recipes",
        Some(token),
        Some(json!({
            "title": title,
            "instructions": "Boil, then bake.",
            "category": category,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    (body["id"].as_str().unwrap().to_string(), title)
}

/// A recipe owned by a fresh user, with that user's token.
async fn recipe_with_owner() -> (String, String, String) {
    let admin = admin_token().await;
    let category = create_category(&admin).await;
    let owner = signup(&unique("cook")).await;
    let (recipe, title) = create_recipe(&owner, &category).await;
    (owner, recipe, title)
}

fn png_upload(uri: &str, token: &str) -> Request<Body> {
    const BOUNDARY: &str = "larder-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"dish.png\"\r\n\
             Content-Type: image/png\r\n\r\n",
            b = BOUNDARY
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"\x89PNG\r\n\x1a\n");
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::post(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_second_review_is_conflict() {
    let (_, recipe, _) = recipe_with_owner().await;
    let reviewer = signup(&unique("critic")).await;
    let uri = format!("/api/recipes/{}/reviews", recipe);

    let (status, _) = call(Method::POST, &uri, Some(&reviewer), Some(json!({"content": "Great"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(Method::POST, &uri, Some(&reviewer), Some(json!({"content": "Again"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User can only have one review for each recipe.");
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_second_rating_is_conflict() {
    let (_, recipe, _) = recipe_with_owner().await;
    let rater = signup(&unique("critic")).await;
    let uri = format!("/api/recipes/{}/ratings", recipe);

    let (status, _) = call(Method::POST, &uri, Some(&rater), Some(json!({"value": 8}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(Method::POST, &uri, Some(&rater), Some(json!({"value": 3}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User can only have one rating for each recipe.");
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_duplicate_ingredient_name_ignores_case() {
    let (owner, recipe, _) = recipe_with_owner().await;
    let uri = format!("/api/recipes/{}/ingredients", recipe);

    let (status, _) = call(
        Method::POST,
        &uri,
        Some(&owner),
        Some(json!({"name": "Cheese", "quantity": "100", "units_of_measurement": "gm"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(
        Method::POST,
        &uri,
        Some(&owner),
        Some(json!({"name": "CHEESE", "quantity": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Ingredient with name 'cheese' already exists for this recipe."
    );
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_fourth_image_is_rejected() {
    let (owner, recipe, title) = recipe_with_owner().await;
    let uri = format!("/api/recipes/{}/images", recipe);

    for _ in 0..3 {
        let (status, body) = send(png_upload(&uri, &owner)).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        assert_eq!(body["recipe_title"], title.as_str());
    }

    let (status, body) = send(png_upload(&uri, &owner)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "More than 3 images cannot be posted for one recipe."
    );

    let (status, body) = call(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_category_in_use_cannot_be_deleted() {
    let admin = admin_token().await;
    let category = create_category(&admin).await;
    let owner = signup(&unique("cook")).await;
    let (recipe, _) = create_recipe(&owner, &category).await;
    let category_uri = format!("/api/categories/{}", category);

    let (status, body) = call(Method::DELETE, &category_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "Category has recipes associated with it, cannot be deleted."
    );

    let (status, _) = call(Method::DELETE, &format!("/api/recipes/{}", recipe), Some(&owner), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(Method::DELETE, &category_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_average_rating() {
    let (_, recipe, _) = recipe_with_owner().await;
    let average_uri = format!("/api/recipes/{}/average-rating", recipe);
    let ratings_uri = format!("/api/recipes/{}/ratings", recipe);

    let (status, body) = call(Method::GET, &average_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"avg_rating": null}));

    for value in [4, 7] {
        let rater = signup(&unique("critic")).await;
        let (status, _) = call(Method::POST, &ratings_uri, Some(&rater), Some(json!({"value": value}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = call(Method::GET, &average_uri, None, None).await;
    assert_eq!(body["avg_rating"].as_f64(), Some(5.5));
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_review_update_check_order() {
    let (_, recipe, _) = recipe_with_owner().await;
    let reviewer = signup(&unique("critic")).await;
    let stranger = signup(&unique("stranger")).await;

    let (status, body) = call(
        Method::POST,
        &format!("/api/recipes/{}/reviews", recipe),
        Some(&reviewer),
        Some(json!({"content": "Great"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let review = body["id"].as_str().unwrap().to_string();
    let edit = json!({"content": "Changed"});

    // Unknown recipe comes first, even for anonymous callers
    let missing_recipe = Uuid::new_v4();
    let (status, body) = call(
        Method::PATCH,
        &format!("/api/recipes/{}/reviews/{}", missing_recipe, review),
        None,
        Some(edit.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        format!("Recipe with id {} was not found.", missing_recipe)
    );

    // Then authentication, before the review is looked up
    let missing_review = Uuid::new_v4();
    let (status, _) = call(
        Method::PATCH,
        &format!("/api/recipes/{}/reviews/{}", recipe, missing_review),
        None,
        Some(edit.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Then the review itself
    let (status, body) = call(
        Method::PATCH,
        &format!("/api/recipes/{}/reviews/{}", recipe, missing_review),
        Some(&stranger),
        Some(edit.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        format!("Review with id {} was not found.", missing_review)
    );

    // Then ownership
    let review_uri = format!("/api/recipes/{}/reviews/{}", recipe, review);
    let (status, _) = call(Method::PATCH, &review_uri, Some(&stranger), Some(edit.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(Method::PATCH, &review_uri, Some(&reviewer), Some(edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Changed");
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_body_is_read_after_permission_checks() {
    let (owner, recipe, _) = recipe_with_owner().await;
    let stranger = signup(&unique("stranger")).await;
    let garbage = || Body::from("{\"name\": ");

    let post = |uri: String, token: Option<&str>| {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(garbage()).unwrap()
    };

    // Missing recipe wins over a bad body
    let (status, _) = send(post(format!("/api/recipes/{}/reviews", Uuid::new_v4()), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let ingredients = format!("/api/recipes/{}/ingredients", recipe);
    let (status, _) = send(post(ingredients.clone(), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(post(ingredients.clone(), Some(&stranger))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(post(ingredients, Some(&owner))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_nested_responses_name_their_recipe() {
    let (owner, recipe, title) = recipe_with_owner().await;
    let critic = signup(&unique("critic")).await;

    let (_, ingredient) = call(
        Method::POST,
        &format!("/api/recipes/{}/ingredients", recipe),
        Some(&owner),
        Some(json!({"name": "Macaroni", "quantity": "250", "units_of_measurement": "gm"})),
    )
    .await;
    let (_, review) = call(
        Method::POST,
        &format!("/api/recipes/{}/reviews", recipe),
        Some(&critic),
        Some(json!({"content": "Cheesy"})),
    )
    .await;
    let (_, rating) = call(
        Method::POST,
        &format!("/api/recipes/{}/ratings", recipe),
        Some(&critic),
        Some(json!({"value": 9})),
    )
    .await;

    for body in [&ingredient, &review, &rating] {
        assert_eq!(body["recipe_title"], title.as_str(), "{}", body);
    }

    let (status, listed) = call(Method::GET, &format!("/api/recipes/{}/reviews", recipe), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["recipe_title"], title.as_str());
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_category_slug_is_validated() {
    let admin = admin_token().await;
    let (status, body) = call(
        Method::POST,
        "/api/categories",
        Some(&admin),
        Some(json!({"title": unique("Stews "), "slug": "Soups & Stews!"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("valid slug"));

    let category = create_category(&admin).await;
    let (status, _) = call(
        Method::PATCH,
        &format!("/api/categories/{}", category),
        Some(&admin),
        Some(json!({"slug": "no spaces"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_only_superusers_manage_categories() {
    let cook = signup(&unique("cook")).await;
    let (status, _) = call(
        Method::POST,
        "/api/categories",
        Some(&cook),
        Some(json!({"title": unique("Pies "), "slug": unique("pies-")})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = admin_token().await;
    create_category(&admin).await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_admin_bootstrap_promotes_existing_user() {
    let username = unique("cook");
    let cook = signup(&username).await;

    let (status, _) = call(
        Method::POST,
        "/api/categories",
        Some(&cook),
        Some(json!({"title": unique("Pies "), "slug": unique("pies-")})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let mut conn = pool().get().unwrap();
    let mut account = admin_account(&username.to_uppercase());
    account.password = "a-different-password".to_string();
    let promoted = ensure_superuser(&mut conn, &account).unwrap();
    assert!(promoted.is_superuser);
    assert_eq!(promoted.username, username);

    // Idempotent, and the user's own password still works
    let again = ensure_superuser(&mut conn, &account).unwrap();
    assert_eq!(again.id, promoted.id);
    let (status, _) = login(&username, PASSWORD).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        Method::POST,
        "/api/categories",
        Some(&cook),
        Some(json!({"title": unique("Pies "), "slug": unique("pies-")})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_admin_bootstrap_rejects_invalid_account() {
    let mut conn = pool().get().unwrap();
    let mut account = admin_account(&unique("admin"));
    account.password = "short".to_string();
    assert!(matches!(
        ensure_superuser(&mut conn, &account),
        Err(AdminSetupError::Invalid(_))
    ));
}
