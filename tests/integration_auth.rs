mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_user, generate_unique_email, generate_unique_username};
use http_body_util::BodyExt;
use readrally::config::cors::CorsConfig;
use readrally::config::email::EmailConfig;
use readrally::config::jwt::JwtConfig;
use readrally::config::otp::OtpConfig;
use readrally::config::verification::VerificationConfig;
use readrally::modules::users::model::UserRole;
use readrally::router::init_router;
use readrally::state::AppState;
use readrally::utils::verification::{encode_uid, make_verification_token};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        email_config: EmailConfig::from_env(),
        otp_config: OtpConfig::from_env(),
        verification_config: VerificationConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_creates_inactive_student(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let username = generate_unique_username();
    let email = generate_unique_email();
    let request = json_request(
        "POST",
        "/api/auth/register",
        json!({
            "username": username,
            "email": email,
            "password": "password123",
            "first_name": "Lena",
            "last_name": "Reader"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "ok");

    let (role, is_active): (UserRole, bool) =
        sqlx::query_as("SELECT role, is_active FROM users WHERE username = $1")
            .bind(&username)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(role, UserRole::Student);
    assert!(!is_active);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_username_rejected(pool: PgPool) {
    let existing = create_test_user(&pool, UserRole::Student, true).await;
    let app = setup_test_app(pool.clone()).await;

    let request = json_request(
        "POST",
        "/api/auth/register",
        json!({
            "username": existing.username,
            "email": generate_unique_email(),
            "password": "password123",
            "first_name": "Lena",
            "last_name": "Reader"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_short_password_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = json_request(
        "POST",
        "/api/auth/register",
        json!({
            "username": generate_unique_username(),
            "email": generate_unique_email(),
            "password": "short",
            "first_name": "Lena",
            "last_name": "Reader"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success_returns_tokens_and_role(pool: PgPool) {
    let user = create_test_user(&pool, UserRole::Student, true).await;
    let app = setup_test_app(pool.clone()).await;

    let request = json_request(
        "POST",
        "/api/auth/login",
        json!({"username": user.username, "password": user.password}),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(body.get("access").is_some());
    assert!(body.get("refresh").is_some());
    assert_eq!(body["role"], "STUDENT");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let user = create_test_user(&pool, UserRole::Student, true).await;
    let app = setup_test_app(pool.clone()).await;

    let request = json_request(
        "POST",
        "/api/auth/login",
        json!({"username": user.username, "password": "not-the-password"}),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["detail"], "Invalid username or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_inactive_account_same_error_as_bad_credentials(pool: PgPool) {
    let user = create_test_user(&pool, UserRole::Student, false).await;
    let app = setup_test_app(pool.clone()).await;

    let request = json_request(
        "POST",
        "/api/auth/login",
        json!({"username": user.username, "password": user.password}),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["detail"], "Invalid username or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_missing_password_field(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = json_request("POST", "/api/auth/login", json!({"username": "someone"}));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

async fn activation_link_parts(pool: &PgPool, user_id: Uuid) -> (String, String) {
    dotenvy::dotenv().ok();
    let hash: String = sqlx::query_scalar("SELECT password FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap();
    let secret = JwtConfig::from_env().secret;
    let uid = encode_uid(user_id);
    let token = make_verification_token(user_id, &hash, false, &secret);
    (uid, token)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_verify_email_activates_and_logs_in(pool: PgPool) {
    let user = create_test_user(&pool, UserRole::Student, false).await;
    let (uid, token) = activation_link_parts(&pool, user.id).await;
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/verify-email/{}/{}", uid, token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Email verified. You are now logged in.");
    assert!(body.get("access").is_some());
    assert!(body.get("refresh").is_some());

    let is_active: bool = sqlx::query_scalar("SELECT is_active FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(is_active);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_verification_link_is_single_use(pool: PgPool) {
    let user = create_test_user(&pool, UserRole::Student, false).await;
    let (uid, token) = activation_link_parts(&pool, user.id).await;
    let app = setup_test_app(pool.clone()).await;

    let uri = format!("/api/verify-email/{}/{}", uid, token);

    let first = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    // Activation changed the account fingerprint, so the same link is dead.
    let second = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body = second.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["detail"], "Token expired or invalid");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_verify_email_malformed_uid(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/verify-email/!!!garbage!!!/sometoken")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_verify_token_endpoint(pool: PgPool) {
    let user = create_test_user(&pool, UserRole::Student, true).await;
    let access = common::bearer_token(&user);
    let app = setup_test_app(pool.clone()).await;

    let valid = app
        .clone()
        .oneshot(json_request("POST", "/api/token/verify", json!({"token": access})))
        .await
        .unwrap();
    assert_eq!(valid.status(), StatusCode::OK);

    let missing = app
        .clone()
        .oneshot(json_request("POST", "/api/token/verify", json!({})))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let garbage = app
        .oneshot(json_request(
            "POST",
            "/api/token/verify",
            json!({"token": "not.a.jwt"}),
        ))
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_me_returns_profile(pool: PgPool) {
    let user = create_test_user(&pool, UserRole::Teacher, true).await;
    let access = common::bearer_token(&user);
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .header("authorization", format!("Bearer {}", access))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["username"], user.username);
    assert_eq!(body["role"], "TEACHER");
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_me_requires_token(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
