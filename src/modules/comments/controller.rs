use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::model::{CommentResponse, CreateCommentDto, StudentFeedback, UpdateCommentDto};
use super::service::CommentService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireViewStudentFeedback;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Post a comment on a book
#[utoipa::path(
    post,
    path = "/api/student-comments",
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 404, description = "Book not found in that competition")
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    let comment = CommentService::create_comment(&state.db, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// List the caller's comments
#[utoipa::path(
    get,
    path = "/api/student-comments",
    responses(
        (status = 200, description = "The caller's comments", body = [CommentResponse])
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_comments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let comments = CommentService::get_comments(&state.db, auth_user.user_id()?).await?;
    Ok(Json(comments))
}

/// Get one of the caller's comments
#[utoipa::path(
    get,
    path = "/api/student-comments/{id}",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment details", body = CommentResponse),
        (status = 404, description = "Comment not found")
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CommentResponse>, AppError> {
    let comment = CommentService::get_comment(&state.db, auth_user.user_id()?, id).await?;
    Ok(Json(comment))
}

/// Update one of the caller's comments
#[utoipa::path(
    put,
    path = "/api/student-comments/{id}",
    params(("id" = Uuid, Path, description = "Comment ID")),
    request_body = UpdateCommentDto,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 404, description = "Comment not found")
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCommentDto>,
) -> Result<Json<CommentResponse>, AppError> {
    let comment = CommentService::update_comment(&state.db, auth_user.user_id()?, id, dto).await?;
    Ok(Json(comment))
}

/// Delete one of the caller's comments
#[utoipa::path(
    delete,
    path = "/api/student-comments/{id}",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "Comment not found")
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    CommentService::delete_comment(&state.db, auth_user.user_id()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Student feedback on the caller's competitions
#[utoipa::path(
    get,
    path = "/api/my-comments",
    responses(
        (status = 200, description = "Students and their comments on the caller's competitions", body = [StudentFeedback]),
        (status = 403, description = "Requires teacher or admin role")
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_feedback(
    State(state): State<AppState>,
    RequireViewStudentFeedback(auth_user): RequireViewStudentFeedback,
) -> Result<Json<Vec<StudentFeedback>>, AppError> {
    let owner = match auth_user.role() {
        UserRole::Admin => None,
        _ => Some(auth_user.user_id()?),
    };
    let feedback = CommentService::get_student_feedback(&state.db, owner).await?;
    Ok(Json(feedback))
}
