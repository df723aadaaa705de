use axum::{Router, routing::post};

use super::controller::{login_user, register_user, request_otp_reset, reset_password_with_otp};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
}

/// OTP endpoints, mounted under `/api/users/otp`.
pub fn init_otp_router() -> Router<AppState> {
    Router::new()
        .route("/request-reset", post(request_otp_reset))
        .route("/reset-password", post(reset_password_with_otp))
}
