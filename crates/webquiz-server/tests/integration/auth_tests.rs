use axum::http::StatusCode;
use tower::ServiceExt;

use webquiz_server::auth::TokenIssuer;

use crate::integration::common::{TEST_JWT_SECRET, post_json, read_json, setup_test_app};

#[tokio::test]
async fn register_creates_user() {
    let app = setup_test_app().await;

    let body = serde_json::json!({"email": "ada@example.com", "password": "quiz-master-pw"});
    let response = app.router.oneshot(post_json("/register", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = read_json(response).await;
    assert_eq!(json["user"]["email"], "ada@example.com");
    assert!(json["user"]["id"].as_i64().unwrap() > 0);

    // The stored hash must not be the plain password.
    let row: (String,) = sqlx::query_as("SELECT password_hash FROM users WHERE email = $1")
        .bind("ada@example.com")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_ne!(row.0, "quiz-master-pw");
    assert!(row.0.starts_with("$2"));
}

#[tokio::test]
async fn register_missing_password_is_400() {
    let app = setup_test_app().await;

    let body = serde_json::json!({"email": "ada@example.com"});
    let response = app.router.oneshot(post_json("/register", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = read_json(response).await;
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn duplicate_registration_is_conflict() {
    let app = setup_test_app().await;

    let body = serde_json::json!({"email": "ada@example.com", "password": "pw"});
    let response = app
        .router
        .clone()
        .oneshot(post_json("/register", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.router.oneshot(post_json("/register", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = read_json(response).await;
    assert_eq!(json["error"], "conflict");

    // Still exactly one user row.
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[tokio::test]
async fn login_returns_decodable_token_with_two_hour_expiry() {
    let app = setup_test_app().await;

    let body = serde_json::json!({"email": "ada@example.com", "password": "quiz-master-pw"});
    let response = app
        .router
        .clone()
        .oneshot(post_json("/register", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let user_id = read_json(response).await["user"]["id"].as_i64().unwrap() as i32;

    let response = app.router.oneshot(post_json("/login", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let token = read_json(response).await["token"].as_str().unwrap().to_string();

    let claims = TokenIssuer::new(TEST_JWT_SECRET.as_bytes())
        .decode(&token)
        .unwrap();
    assert_eq!(claims.id, user_id);
    assert_eq!(claims.email, "ada@example.com");
    assert_eq!(claims.exp - claims.iat, 2 * 3600);
}

#[tokio::test]
async fn login_unknown_email_is_400() {
    let app = setup_test_app().await;

    let body = serde_json::json!({"email": "nobody@example.com", "password": "pw"});
    let response = app.router.oneshot(post_json("/login", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = read_json(response).await;
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn login_wrong_password_is_401() {
    let app = setup_test_app().await;

    let register = serde_json::json!({"email": "ada@example.com", "password": "correct"});
    let response = app
        .router
        .clone()
        .oneshot(post_json("/register", &register))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let login = serde_json::json!({"email": "ada@example.com", "password": "wrong"});
    let response = app.router.oneshot(post_json("/login", &login)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = read_json(response).await;
    assert_eq!(json["error"], "unauthorized");
}
