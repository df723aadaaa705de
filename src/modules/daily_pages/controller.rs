use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use super::model::{CreateDailyPageDto, DailyPage};
use super::service::DailyPageService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Log pages read today
#[utoipa::path(
    post,
    path = "/api/daily-pages",
    request_body = CreateDailyPageDto,
    responses(
        (status = 201, description = "Entry logged", body = DailyPage),
        (status = 404, description = "Book not found in that competition")
    ),
    tag = "Daily pages",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_daily_page(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateDailyPageDto>,
) -> Result<(StatusCode, Json<DailyPage>), AppError> {
    let entry = DailyPageService::create_daily_page(&state.db, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// List the caller's reading log
#[utoipa::path(
    get,
    path = "/api/daily-pages",
    responses(
        (status = 200, description = "The caller's reading log", body = [DailyPage])
    ),
    tag = "Daily pages",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_daily_pages(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<DailyPage>>, AppError> {
    let entries = DailyPageService::get_daily_pages(&state.db, auth_user.user_id()?).await?;
    Ok(Json(entries))
}
