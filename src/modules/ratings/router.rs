use axum::{Router, routing::post};

use super::controller::{create_rating, get_ratings};
use crate::state::AppState;

pub fn init_ratings_router() -> Router<AppState> {
    Router::new().route("/", post(create_rating).get(get_ratings))
}
