use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use super::model::{BookRating, CreateBookRatingDto};
use super::service::BookRatingService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Rate a book
#[utoipa::path(
    post,
    path = "/api/book-ratings",
    request_body = CreateBookRatingDto,
    responses(
        (status = 201, description = "Rating recorded", body = BookRating),
        (status = 404, description = "Book not found in that competition"),
        (status = 422, description = "Rating out of range")
    ),
    tag = "Ratings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_rating(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateBookRatingDto>,
) -> Result<(StatusCode, Json<BookRating>), AppError> {
    let rating = BookRatingService::create_rating(&state.db, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

/// List the caller's ratings
#[utoipa::path(
    get,
    path = "/api/book-ratings",
    responses(
        (status = 200, description = "The caller's ratings", body = [BookRating])
    ),
    tag = "Ratings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_ratings(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<BookRating>>, AppError> {
    let ratings = BookRatingService::get_ratings(&state.db, auth_user.user_id()?).await?;
    Ok(Json(ratings))
}
