use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    create_comment, delete_comment, get_comment, get_comments, get_student_feedback,
    update_comment,
};
use crate::state::AppState;

pub fn init_comments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_comment).get(get_comments))
        .route(
            "/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
}

/// Mounted at `/api/my-comments`.
pub fn init_feedback_router() -> Router<AppState> {
    Router::new().route("/", get(get_student_feedback))
}
