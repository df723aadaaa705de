use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::model::{Book, CreateBookDto, UpdateBookDto};
use super::service::BookService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireManageBooks;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Admins see everything; teachers only books on their own competitions.
fn ownership_scope(auth_user: &AuthUser) -> Result<Option<Uuid>, AppError> {
    match auth_user.role() {
        UserRole::Admin => Ok(None),
        _ => Ok(Some(auth_user.user_id()?)),
    }
}

/// Add a book to a competition's reading list
#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookDto,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 403, description = "Requires teacher or admin role"),
        (status = 404, description = "Competition not found or not owned by caller")
    ),
    tag = "Books",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_book(
    State(state): State<AppState>,
    RequireManageBooks(auth_user): RequireManageBooks,
    ValidatedJson(dto): ValidatedJson<CreateBookDto>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let owner = ownership_scope(&auth_user)?;
    let book = BookService::create_book(&state.db, owner, dto).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// List books on the caller's competitions
#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "List of books", body = [Book]),
        (status = 403, description = "Requires teacher or admin role")
    ),
    tag = "Books",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_books(
    State(state): State<AppState>,
    RequireManageBooks(auth_user): RequireManageBooks,
) -> Result<Json<Vec<Book>>, AppError> {
    let owner = ownership_scope(&auth_user)?;
    let books = BookService::get_books(&state.db, owner).await?;
    Ok(Json(books))
}

/// Get one book
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    ),
    tag = "Books",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_book(
    State(state): State<AppState>,
    RequireManageBooks(auth_user): RequireManageBooks,
    Path(id): Path<Uuid>,
) -> Result<Json<Book>, AppError> {
    let owner = ownership_scope(&auth_user)?;
    let book = BookService::get_book(&state.db, owner, id).await?;
    Ok(Json(book))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = Uuid, Path, description = "Book ID")),
    request_body = UpdateBookDto,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found")
    ),
    tag = "Books",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_book(
    State(state): State<AppState>,
    RequireManageBooks(auth_user): RequireManageBooks,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateBookDto>,
) -> Result<Json<Book>, AppError> {
    let owner = ownership_scope(&auth_user)?;
    let book = BookService::update_book(&state.db, owner, id, dto).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    ),
    tag = "Books",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_book(
    State(state): State<AppState>,
    RequireManageBooks(auth_user): RequireManageBooks,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let owner = ownership_scope(&auth_user)?;
    BookService::delete_book(&state.db, owner, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
