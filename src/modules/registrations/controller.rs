use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::model::{AttendanceEntry, CreateRegistrationDto, RegistrationResponse};
use super::service::RegistrationService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireViewAttendance;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Register for a competition
#[utoipa::path(
    post,
    path = "/api/competition-registrations",
    request_body = CreateRegistrationDto,
    responses(
        (status = 201, description = "Registered", body = RegistrationResponse),
        (status = 404, description = "Competition not found"),
        (status = 409, description = "Already registered for this competition")
    ),
    tag = "Registrations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_registration(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateRegistrationDto>,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    let registration =
        RegistrationService::register(&state.db, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// List the caller's registrations
#[utoipa::path(
    get,
    path = "/api/competition-registrations",
    responses(
        (status = 200, description = "The caller's registrations", body = [RegistrationResponse])
    ),
    tag = "Registrations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_registrations(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<RegistrationResponse>>, AppError> {
    let registrations =
        RegistrationService::get_registrations(&state.db, auth_user.user_id()?).await?;
    Ok(Json(registrations))
}

/// Withdraw a registration
#[utoipa::path(
    delete,
    path = "/api/competition-registrations/{id}",
    params(("id" = Uuid, Path, description = "Registration ID")),
    responses(
        (status = 204, description = "Registration deleted"),
        (status = 404, description = "Registration not found")
    ),
    tag = "Registrations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_registration(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    RegistrationService::delete_registration(&state.db, auth_user.user_id()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attendance on the caller's competitions
#[utoipa::path(
    get,
    path = "/api/teacher/attendance",
    responses(
        (status = 200, description = "Registered students on the caller's competitions", body = [AttendanceEntry]),
        (status = 403, description = "Requires teacher or admin role")
    ),
    tag = "Registrations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    RequireViewAttendance(auth_user): RequireViewAttendance,
) -> Result<Json<Vec<AttendanceEntry>>, AppError> {
    let owner = match auth_user.role() {
        UserRole::Admin => None,
        _ => Some(auth_user.user_id()?),
    };
    let entries = RegistrationService::get_attendance(&state.db, owner).await?;
    Ok(Json(entries))
}
