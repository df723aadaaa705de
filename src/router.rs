use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::achievements::router::init_achievements_router;
use crate::modules::auth::controller::{verify_email, verify_token};
use crate::modules::auth::router::{init_auth_router, init_otp_router};
use crate::modules::books::router::init_books_router;
use crate::modules::comments::router::{init_comments_router, init_feedback_router};
use crate::modules::competitions::router::{
    init_competitions_router, init_student_competitions_router,
};
use crate::modules::daily_pages::router::init_daily_pages_router;
use crate::modules::notifications::router::{init_inbox_router, init_notifications_router};
use crate::modules::ratings::router::init_ratings_router;
use crate::modules::registrations::router::{init_attendance_router, init_registrations_router};
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/users/otp", init_otp_router())
                .nest("/users", init_users_router())
                .route("/token/verify", post(verify_token))
                .route("/verify-email/{uid}/{token}", get(verify_email))
                .nest("/competitions", init_competitions_router())
                .nest("/competitions-student", init_student_competitions_router())
                .nest("/books", init_books_router())
                .nest("/competition-registrations", init_registrations_router())
                .nest("/teacher/attendance", init_attendance_router())
                .nest("/student-comments", init_comments_router())
                .nest("/my-comments", init_feedback_router())
                .nest("/daily-pages", init_daily_pages_router())
                .nest("/book-ratings", init_ratings_router())
                .nest("/achievements", init_achievements_router())
                .nest("/notifications", init_notifications_router())
                .nest("/inbox", init_inbox_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
