use axum::{Router, routing::get, routing::post};

use super::controller::{create_notification, get_inbox, get_notifications};
use crate::state::AppState;

pub fn init_notifications_router() -> Router<AppState> {
    Router::new().route("/", post(create_notification).get(get_notifications))
}

/// Mounted at `/api/inbox`.
pub fn init_inbox_router() -> Router<AppState> {
    Router::new().route("/", get(get_inbox))
}
