use axum::{Router, routing::post};

use super::controller::{create_daily_page, get_daily_pages};
use crate::state::AppState;

pub fn init_daily_pages_router() -> Router<AppState> {
    Router::new().route("/", post(create_daily_page).get(get_daily_pages))
}
