use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{create_book, delete_book, get_book, get_books, update_book};
use crate::state::AppState;

pub fn init_books_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_book).get(get_books))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
}
