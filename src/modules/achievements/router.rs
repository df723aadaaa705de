use axum::{
    Router,
    routing::{delete, post},
};

use super::controller::{create_achievement, delete_achievement, get_achievements};
use crate::state::AppState;

pub fn init_achievements_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_achievement).get(get_achievements))
        .route("/{id}", delete(delete_achievement))
}
