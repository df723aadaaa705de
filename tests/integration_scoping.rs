mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    bearer_token, create_test_book, create_test_competition, create_test_registration,
    create_test_user,
};
use http_body_util::BodyExt;
use readrally::config::cors::CorsConfig;
use readrally::config::email::EmailConfig;
use readrally::config::jwt::JwtConfig;
use readrally::config::otp::OtpConfig;
use readrally::config::verification::VerificationConfig;
use readrally::modules::users::model::UserRole;
use readrally::router::init_router;
use readrally::state::AppState;
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

fn authed_json(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_create_competition(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student, true).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            "/api/competitions",
            &bearer_token(&student),
            json!({
                "title": "Winter Reading",
                "start_date": "2026-12-01",
                "end_date": "2026-12-31"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(
        body["detail"],
        "You do not have permission to perform this action"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_competition_list_scoped(pool: PgPool) {
    let teacher1 = create_test_user(&pool, UserRole::Teacher, true).await;
    let teacher2 = create_test_user(&pool, UserRole::Teacher, true).await;
    create_test_competition(&pool, teacher1.id).await;
    let app = setup_test_app(pool.clone()).await;

    let own = app
        .clone()
        .oneshot(authed("GET", "/api/competitions", &bearer_token(&teacher1)))
        .await
        .unwrap();
    assert_eq!(body_json(own).await.as_array().unwrap().len(), 1);

    let other = app
        .oneshot(authed("GET", "/api/competitions", &bearer_token(&teacher2)))
        .await
        .unwrap();
    assert!(body_json(other).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_sees_all_competitions(pool: PgPool) {
    let teacher1 = create_test_user(&pool, UserRole::Teacher, true).await;
    let teacher2 = create_test_user(&pool, UserRole::Teacher, true).await;
    let admin = create_test_user(&pool, UserRole::Admin, true).await;
    create_test_competition(&pool, teacher1.id).await;
    create_test_competition(&pool, teacher2.id).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed("GET", "/api/competitions", &bearer_token(&admin)))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_cannot_touch_foreign_competition(pool: PgPool) {
    let teacher1 = create_test_user(&pool, UserRole::Teacher, true).await;
    let teacher2 = create_test_user(&pool, UserRole::Teacher, true).await;
    let competition_id = create_test_competition(&pool, teacher1.id).await;
    let app = setup_test_app(pool.clone()).await;

    let get = app
        .clone()
        .oneshot(authed(
            "GET",
            &format!("/api/competitions/{}", competition_id),
            &bearer_token(&teacher2),
        ))
        .await
        .unwrap();
    assert_eq!(get.status(), StatusCode::NOT_FOUND);

    let delete = app
        .oneshot(authed(
            "DELETE",
            &format!("/api/competitions/{}", competition_id),
            &bearer_token(&teacher2),
        ))
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_cannot_add_book_to_foreign_competition(pool: PgPool) {
    let teacher1 = create_test_user(&pool, UserRole::Teacher, true).await;
    let teacher2 = create_test_user(&pool, UserRole::Teacher, true).await;
    let competition_id = create_test_competition(&pool, teacher1.id).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            "/api/books",
            &bearer_token(&teacher2),
            json!({
                "competition_id": competition_id,
                "title": "Infinite Jest",
                "author": "David Foster Wallace",
                "category": "Fiction"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_catalog_shows_registration_state(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher, true).await;
    let student = create_test_user(&pool, UserRole::Student, true).await;
    let registered_id = create_test_competition(&pool, teacher.id).await;
    let open_id = create_test_competition(&pool, teacher.id).await;
    create_test_book(&pool, registered_id).await;
    create_test_registration(&pool, student.id, registered_id).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed(
            "GET",
            "/api/competitions-student",
            &bearer_token(&student),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    for entry in entries {
        if entry["id"] == registered_id.to_string() {
            assert_eq!(entry["is_registered"], true);
            assert_eq!(entry["books"].as_array().unwrap().len(), 1);
        } else {
            assert_eq!(entry["id"], open_id.to_string());
            assert_eq!(entry["is_registered"], false);
        }
        assert_eq!(entry["full_name"], "Test User");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_comment_rows_scoped_to_author(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher, true).await;
    let alice = create_test_user(&pool, UserRole::Student, true).await;
    let bob = create_test_user(&pool, UserRole::Student, true).await;
    let competition_id = create_test_competition(&pool, teacher.id).await;
    let book_id = create_test_book(&pool, competition_id).await;
    let app = setup_test_app(pool.clone()).await;

    let created = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/student-comments",
            &bearer_token(&alice),
            json!({
                "comment_type": "book summary",
                "competition_id": competition_id,
                "book_id": book_id,
                "text": "A sprawling, unfinished wonder."
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let comment = body_json(created).await;
    let comment_id = comment["id"].as_str().unwrap().to_string();
    assert_eq!(comment["comment_type"], "book summary");
    assert_eq!(comment["book"]["id"], book_id.to_string());

    let foreign_get = app
        .clone()
        .oneshot(authed(
            "GET",
            &format!("/api/student-comments/{}", comment_id),
            &bearer_token(&bob),
        ))
        .await
        .unwrap();
    assert_eq!(foreign_get.status(), StatusCode::NOT_FOUND);

    let foreign_delete = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/student-comments/{}", comment_id),
            &bearer_token(&bob),
        ))
        .await
        .unwrap();
    assert_eq!(foreign_delete.status(), StatusCode::NOT_FOUND);

    let own_get = app
        .oneshot(authed(
            "GET",
            &format!("/api/student-comments/{}", comment_id),
            &bearer_token(&alice),
        ))
        .await
        .unwrap();
    assert_eq!(own_get.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_my_comments_scoped_to_own_competitions(pool: PgPool) {
    let teacher1 = create_test_user(&pool, UserRole::Teacher, true).await;
    let teacher2 = create_test_user(&pool, UserRole::Teacher, true).await;
    let student = create_test_user(&pool, UserRole::Student, true).await;
    let competition_id = create_test_competition(&pool, teacher1.id).await;
    let book_id = create_test_book(&pool, competition_id).await;
    let app = setup_test_app(pool.clone()).await;

    let created = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/student-comments",
            &bearer_token(&student),
            json!({
                "comment_type": "thoughts",
                "competition_id": competition_id,
                "book_id": book_id,
                "text": "Loved the footnotes."
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let own = app
        .clone()
        .oneshot(authed("GET", "/api/my-comments", &bearer_token(&teacher1)))
        .await
        .unwrap();
    let body = body_json(own).await;
    let feedback = body.as_array().unwrap();
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0]["id"], student.id.to_string());
    assert_eq!(feedback[0]["comments"].as_array().unwrap().len(), 1);

    let other = app
        .clone()
        .oneshot(authed("GET", "/api/my-comments", &bearer_token(&teacher2)))
        .await
        .unwrap();
    assert!(body_json(other).await.as_array().unwrap().is_empty());

    let student_view = app
        .oneshot(authed("GET", "/api/my-comments", &bearer_token(&student)))
        .await
        .unwrap();
    assert_eq!(student_view.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_daily_pages_and_ratings_scoped(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher, true).await;
    let alice = create_test_user(&pool, UserRole::Student, true).await;
    let bob = create_test_user(&pool, UserRole::Student, true).await;
    let competition_id = create_test_competition(&pool, teacher.id).await;
    let book_id = create_test_book(&pool, competition_id).await;
    let app = setup_test_app(pool.clone()).await;

    let logged = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/daily-pages",
            &bearer_token(&alice),
            json!({"competition_id": competition_id, "book_id": book_id, "page": 42}),
        ))
        .await
        .unwrap();
    assert_eq!(logged.status(), StatusCode::CREATED);

    let rated = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/book-ratings",
            &bearer_token(&alice),
            json!({"competition_id": competition_id, "book_id": book_id, "rating": 5}),
        ))
        .await
        .unwrap();
    assert_eq!(rated.status(), StatusCode::CREATED);

    let bob_pages = app
        .clone()
        .oneshot(authed("GET", "/api/daily-pages", &bearer_token(&bob)))
        .await
        .unwrap();
    assert!(body_json(bob_pages).await.as_array().unwrap().is_empty());

    let bob_ratings = app
        .clone()
        .oneshot(authed("GET", "/api/book-ratings", &bearer_token(&bob)))
        .await
        .unwrap();
    assert!(body_json(bob_ratings).await.as_array().unwrap().is_empty());

    let alice_pages = app
        .oneshot(authed("GET", "/api/daily-pages", &bearer_token(&alice)))
        .await
        .unwrap();
    assert_eq!(body_json(alice_pages).await.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rating_out_of_range_rejected(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher, true).await;
    let student = create_test_user(&pool, UserRole::Student, true).await;
    let competition_id = create_test_competition(&pool, teacher.id).await;
    let book_id = create_test_book(&pool, competition_id).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            "/api/book-ratings",
            &bearer_token(&student),
            json!({"competition_id": competition_id, "book_id": book_id, "rating": 6}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_inbox_lists_joined_competitions(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher, true).await;
    let student = create_test_user(&pool, UserRole::Student, true).await;
    let joined_id = create_test_competition(&pool, teacher.id).await;
    create_test_competition(&pool, teacher.id).await;
    create_test_registration(&pool, student.id, joined_id).await;
    let app = setup_test_app(pool.clone()).await;

    let posted = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/notifications",
            &bearer_token(&teacher),
            json!({"competition_id": joined_id, "text": "Kickoff is Monday"}),
        ))
        .await
        .unwrap();
    assert_eq!(posted.status(), StatusCode::CREATED);

    let inbox = app
        .clone()
        .oneshot(authed("GET", "/api/inbox", &bearer_token(&student)))
        .await
        .unwrap();
    assert_eq!(inbox.status(), StatusCode::OK);
    let body = body_json(inbox).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], joined_id.to_string());
    assert_eq!(entries[0]["notifications"].as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["notifications"][0]["text"], "Kickoff is Monday");

    // The teacher created both competitions, so both show up for them.
    let teacher_inbox = app
        .oneshot(authed("GET", "/api/inbox", &bearer_token(&teacher)))
        .await
        .unwrap();
    assert_eq!(body_json(teacher_inbox).await.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_achievements_scoped_to_caller(pool: PgPool) {
    let alice = create_test_user(&pool, UserRole::Student, true).await;
    let bob = create_test_user(&pool, UserRole::Student, true).await;
    let app = setup_test_app(pool.clone()).await;

    let created = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/achievements",
            &bearer_token(&alice),
            json!({"name": "First book finished"}),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let achievement = body_json(created).await;
    let achievement_id = achievement["id"].as_str().unwrap().to_string();

    let foreign_delete = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/achievements/{}", achievement_id),
            &bearer_token(&bob),
        ))
        .await
        .unwrap();
    assert_eq!(foreign_delete.status(), StatusCode::NOT_FOUND);

    let bob_list = app
        .oneshot(authed("GET", "/api/achievements", &bearer_token(&bob)))
        .await
        .unwrap();
    assert!(body_json(bob_list).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_comment_requires_matching_book_and_competition(pool: PgPool) {
    let teacher = create_test_user(&pool, UserRole::Teacher, true).await;
    let student = create_test_user(&pool, UserRole::Student, true).await;
    let competition_id = create_test_competition(&pool, teacher.id).await;
    create_test_book(&pool, competition_id).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            "/api/student-comments",
            &bearer_token(&student),
            json!({
                "comment_type": "notes",
                "competition_id": competition_id,
                "book_id": Uuid::new_v4(),
                "text": "Not a real book"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
