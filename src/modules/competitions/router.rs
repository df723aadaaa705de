use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    create_competition, delete_competition, get_competition, get_competitions,
    get_student_catalog, get_student_competition, update_competition,
};
use crate::state::AppState;

pub fn init_competitions_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_competition).get(get_competitions))
        .route(
            "/{id}",
            get(get_competition)
                .put(update_competition)
                .delete(delete_competition),
        )
}

/// Read-only catalog for students, mounted at `/api/competitions-student`.
pub fn init_student_competitions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_student_catalog))
        .route("/{id}", get(get_student_competition))
}
