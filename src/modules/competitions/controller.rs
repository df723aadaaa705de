use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    Competition, CompetitionWithBooks, CreateCompetitionDto, StudentCompetition,
    UpdateCompetitionDto,
};
use super::service::CompetitionService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireManageCompetitions;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

fn ownership_scope(auth_user: &AuthUser) -> Result<Option<Uuid>, AppError> {
    match auth_user.role() {
        UserRole::Admin => Ok(None),
        _ => Ok(Some(auth_user.user_id()?)),
    }
}

/// Create a competition
#[utoipa::path(
    post,
    path = "/api/competitions",
    request_body = CreateCompetitionDto,
    responses(
        (status = 201, description = "Competition created", body = Competition),
        (status = 403, description = "Requires teacher or admin role")
    ),
    tag = "Competitions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_competition(
    State(state): State<AppState>,
    RequireManageCompetitions(auth_user): RequireManageCompetitions,
    ValidatedJson(dto): ValidatedJson<CreateCompetitionDto>,
) -> Result<(StatusCode, Json<Competition>), AppError> {
    let competition =
        CompetitionService::create_competition(&state.db, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(competition)))
}

/// List the caller's competitions
#[utoipa::path(
    get,
    path = "/api/competitions",
    responses(
        (status = 200, description = "Competitions created by the caller", body = [Competition]),
        (status = 403, description = "Requires teacher or admin role")
    ),
    tag = "Competitions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_competitions(
    State(state): State<AppState>,
    RequireManageCompetitions(auth_user): RequireManageCompetitions,
) -> Result<Json<Vec<Competition>>, AppError> {
    let owner = ownership_scope(&auth_user)?;
    let competitions = CompetitionService::get_competitions(&state.db, owner).await?;
    Ok(Json(competitions))
}

/// Get one of the caller's competitions with its reading list
#[utoipa::path(
    get,
    path = "/api/competitions/{id}",
    params(("id" = Uuid, Path, description = "Competition ID")),
    responses(
        (status = 200, description = "Competition details", body = CompetitionWithBooks),
        (status = 404, description = "Competition not found")
    ),
    tag = "Competitions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_competition(
    State(state): State<AppState>,
    RequireManageCompetitions(auth_user): RequireManageCompetitions,
    Path(id): Path<Uuid>,
) -> Result<Json<CompetitionWithBooks>, AppError> {
    let owner = ownership_scope(&auth_user)?;
    let competition = CompetitionService::get_competition(&state.db, owner, id).await?;
    Ok(Json(competition))
}

/// Update a competition
#[utoipa::path(
    put,
    path = "/api/competitions/{id}",
    params(("id" = Uuid, Path, description = "Competition ID")),
    request_body = UpdateCompetitionDto,
    responses(
        (status = 200, description = "Competition updated", body = Competition),
        (status = 404, description = "Competition not found")
    ),
    tag = "Competitions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_competition(
    State(state): State<AppState>,
    RequireManageCompetitions(auth_user): RequireManageCompetitions,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCompetitionDto>,
) -> Result<Json<Competition>, AppError> {
    let owner = ownership_scope(&auth_user)?;
    let competition = CompetitionService::update_competition(&state.db, owner, id, dto).await?;
    Ok(Json(competition))
}

/// Delete a competition
#[utoipa::path(
    delete,
    path = "/api/competitions/{id}",
    params(("id" = Uuid, Path, description = "Competition ID")),
    responses(
        (status = 204, description = "Competition deleted"),
        (status = 404, description = "Competition not found")
    ),
    tag = "Competitions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_competition(
    State(state): State<AppState>,
    RequireManageCompetitions(auth_user): RequireManageCompetitions,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let owner = ownership_scope(&auth_user)?;
    CompetitionService::delete_competition(&state.db, owner, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Browse the competition catalog (any authenticated user)
#[utoipa::path(
    get,
    path = "/api/competitions-student",
    responses(
        (status = 200, description = "All competitions with registration status", body = [StudentCompetition]),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Competitions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_catalog(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<StudentCompetition>>, AppError> {
    let catalog = CompetitionService::get_student_catalog(&state.db, auth_user.user_id()?).await?;
    Ok(Json(catalog))
}

/// View one catalog entry (any authenticated user)
#[utoipa::path(
    get,
    path = "/api/competitions-student/{id}",
    params(("id" = Uuid, Path, description = "Competition ID")),
    responses(
        (status = 200, description = "Competition with registration status", body = StudentCompetition),
        (status = 404, description = "Competition not found")
    ),
    tag = "Competitions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_competition(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentCompetition>, AppError> {
    let competition =
        CompetitionService::get_student_competition(&state.db, auth_user.user_id()?, id).await?;
    Ok(Json(competition))
}
