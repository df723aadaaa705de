use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::model::{Achievement, CreateAchievementDto};
use super::service::AchievementService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Record an achievement
#[utoipa::path(
    post,
    path = "/api/achievements",
    request_body = CreateAchievementDto,
    responses(
        (status = 201, description = "Achievement recorded", body = Achievement)
    ),
    tag = "Achievements",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_achievement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateAchievementDto>,
) -> Result<(StatusCode, Json<Achievement>), AppError> {
    let achievement =
        AchievementService::create_achievement(&state.db, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(achievement)))
}

/// List the caller's achievements
#[utoipa::path(
    get,
    path = "/api/achievements",
    responses(
        (status = 200, description = "The caller's achievements", body = [Achievement])
    ),
    tag = "Achievements",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_achievements(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Achievement>>, AppError> {
    let achievements =
        AchievementService::get_achievements(&state.db, auth_user.user_id()?).await?;
    Ok(Json(achievements))
}

/// Delete one of the caller's achievements
#[utoipa::path(
    delete,
    path = "/api/achievements/{id}",
    params(("id" = Uuid, Path, description = "Achievement ID")),
    responses(
        (status = 204, description = "Achievement deleted"),
        (status = 404, description = "Achievement not found")
    ),
    tag = "Achievements",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_achievement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AchievementService::delete_achievement(&state.db, auth_user.user_id()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
