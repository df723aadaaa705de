use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use super::model::{CreateNotificationDto, InboxEntry, Notification};
use super::service::NotificationService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Post a notification on a competition
#[utoipa::path(
    post,
    path = "/api/notifications",
    request_body = CreateNotificationDto,
    responses(
        (status = 201, description = "Notification created", body = Notification),
        (status = 404, description = "Competition not found")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_notification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateNotificationDto>,
) -> Result<(StatusCode, Json<Notification>), AppError> {
    let notification =
        NotificationService::create_notification(&state.db, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// List the caller's notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notifications posted by the caller", body = [Notification])
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_notifications(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications =
        NotificationService::get_notifications(&state.db, auth_user.user_id()?).await?;
    Ok(Json(notifications))
}

/// Inbox: the caller's competitions with their notifications
#[utoipa::path(
    get,
    path = "/api/inbox",
    responses(
        (status = 200, description = "Competitions the caller belongs to, with notifications", body = [InboxEntry])
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_inbox(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<InboxEntry>>, AppError> {
    let inbox = NotificationService::get_inbox(&state.db, auth_user.user_id()?).await?;
    Ok(Json(inbox))
}
