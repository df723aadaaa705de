use axum::{
    Router,
    routing::{delete, get, post},
};

use super::controller::{
    create_registration, delete_registration, get_attendance, get_registrations,
};
use crate::state::AppState;

pub fn init_registrations_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_registration).get(get_registrations))
        .route("/{id}", delete(delete_registration))
}

/// Mounted at `/api/teacher/attendance`.
pub fn init_attendance_router() -> Router<AppState> {
    Router::new().route("/", get(get_attendance))
}
