use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;

use super::model::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequestDto, RegisterResponse,
    RequestOtpDto, ResetPasswordWithOtpDto, VerifyEmailResponse, VerifyTokenRequest,
};
use super::service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_access_token;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Register a new user and send the verification email
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered, verification link sent", body = RegisterResponse),
        (status = 400, description = "Validation error or username/email taken", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    AuthService::register_user(&state.db, dto, &state.jwt_config, &state.email_config).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            status: "ok".to_string(),
            message: "Verification link sent to your email.".to_string(),
        }),
    ))
}

/// Login and receive access and refresh tokens
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials or inactive account", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Activate an account via the emailed verification link
#[utoipa::path(
    get,
    path = "/api/verify-email/{uid}/{token}",
    params(
        ("uid" = String, Path, description = "Opaque user reference"),
        ("token" = String, Path, description = "Verification token")
    ),
    responses(
        (status = 200, description = "Account activated", body = VerifyEmailResponse),
        (status = 400, description = "Invalid link or expired token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, token))]
pub async fn verify_email(
    State(state): State<AppState>,
    Path((uid, token)): Path<(String, String)>,
) -> Result<Json<VerifyEmailResponse>, AppError> {
    let response = AuthService::verify_email(
        &state.db,
        &uid,
        &token,
        &state.jwt_config,
        &state.verification_config,
    )
    .await?;
    Ok(Json(response))
}

/// Check whether an access token is valid
#[utoipa::path(
    post,
    path = "/api/token/verify",
    request_body = VerifyTokenRequest,
    responses(
        (status = 200, description = "Token is valid", body = MessageResponse),
        (status = 400, description = "Token missing from request", body = ErrorResponse),
        (status = 401, description = "Token invalid or expired", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn verify_token(
    State(state): State<AppState>,
    Json(dto): Json<VerifyTokenRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let token = dto
        .token
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Token is required")))?;

    verify_access_token(&token, &state.jwt_config)?;

    Ok(Json(MessageResponse {
        message: "Token is valid".to_string(),
    }))
}

/// Request a password reset code
#[utoipa::path(
    post,
    path = "/api/users/otp/request-reset",
    request_body = RequestOtpDto,
    responses(
        (status = 200, description = "Uniform response; a code is emailed if the account exists", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn request_otp_reset(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RequestOtpDto>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::request_otp_reset(&state.db, &dto.email, &state.email_config).await?;
    Ok(Json(MessageResponse {
        message: "If an account exists with that email, a reset code has been sent.".to_string(),
    }))
}

/// Reset the password using an emailed one-time code
#[utoipa::path(
    post,
    path = "/api/users/otp/reset-password",
    request_body = ResetPasswordWithOtpDto,
    responses(
        (status = 200, description = "Password reset successfully", body = MessageResponse),
        (status = 400, description = "Invalid or expired OTP", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn reset_password_with_otp(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResetPasswordWithOtpDto>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::reset_password_with_otp(&state.db, dto, &state.otp_config).await?;
    Ok(Json(MessageResponse {
        message: "Password has been reset successfully. You can now log in with your new password."
            .to_string(),
    }))
}
