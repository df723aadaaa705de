use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::books::model::{Book, CreateBookDto, UpdateBookDto};
use crate::utils::errors::AppError;

/// Books always belong to a competition. Non-admin callers can only touch
/// books on competitions they created; anything else is scoped out of the
/// queryset and surfaces as 404.
pub struct BookService;

impl BookService {
    /// `owner` is `None` for admins (no scoping) and `Some(caller)` for teachers.
    #[instrument(skip(db, dto))]
    pub async fn create_book(
        db: &PgPool,
        owner: Option<Uuid>,
        dto: CreateBookDto,
    ) -> Result<Book, AppError> {
        Self::assert_competition_in_scope(db, owner, dto.competition_id).await?;

        let book = sqlx::query_as::<_, Book>(
            "INSERT INTO books (competition_id, title, author, category, file_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, competition_id, title, author, category, file_url, created_at, updated_at",
        )
        .bind(dto.competition_id)
        .bind(&dto.title)
        .bind(&dto.author)
        .bind(&dto.category)
        .bind(&dto.file_url)
        .fetch_one(db)
        .await?;

        Ok(book)
    }

    #[instrument(skip(db))]
    pub async fn get_books(db: &PgPool, owner: Option<Uuid>) -> Result<Vec<Book>, AppError> {
        let books = match owner {
            None => {
                sqlx::query_as::<_, Book>(
                    "SELECT id, competition_id, title, author, category, file_url, created_at, updated_at
                     FROM books ORDER BY created_at DESC",
                )
                .fetch_all(db)
                .await?
            }
            Some(owner) => {
                sqlx::query_as::<_, Book>(
                    "SELECT b.id, b.competition_id, b.title, b.author, b.category, b.file_url, b.created_at, b.updated_at
                     FROM books b
                     JOIN competitions c ON c.id = b.competition_id
                     WHERE c.created_by = $1
                     ORDER BY b.created_at DESC",
                )
                .bind(owner)
                .fetch_all(db)
                .await?
            }
        };

        Ok(books)
    }

    #[instrument(skip(db))]
    pub async fn get_book(db: &PgPool, owner: Option<Uuid>, book_id: Uuid) -> Result<Book, AppError> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT b.id, b.competition_id, b.title, b.author, b.category, b.file_url, b.created_at, b.updated_at
             FROM books b
             JOIN competitions c ON c.id = b.competition_id
             WHERE b.id = $1 AND ($2::uuid IS NULL OR c.created_by = $2)",
        )
        .bind(book_id)
        .bind(owner)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Book not found")))?;

        Ok(book)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_book(
        db: &PgPool,
        owner: Option<Uuid>,
        book_id: Uuid,
        dto: UpdateBookDto,
    ) -> Result<Book, AppError> {
        let current = Self::get_book(db, owner, book_id).await?;

        let book = sqlx::query_as::<_, Book>(
            "UPDATE books
             SET title = $2, author = $3, category = $4, file_url = $5, updated_at = NOW()
             WHERE id = $1
             RETURNING id, competition_id, title, author, category, file_url, created_at, updated_at",
        )
        .bind(book_id)
        .bind(dto.title.unwrap_or(current.title))
        .bind(dto.author.unwrap_or(current.author))
        .bind(dto.category.unwrap_or(current.category))
        .bind(dto.file_url.or(current.file_url))
        .fetch_one(db)
        .await?;

        Ok(book)
    }

    #[instrument(skip(db))]
    pub async fn delete_book(db: &PgPool, owner: Option<Uuid>, book_id: Uuid) -> Result<(), AppError> {
        // Scope check first so foreign books 404 instead of silently no-op.
        Self::get_book(db, owner, book_id).await?;

        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(book_id)
            .execute(db)
            .await?;

        Ok(())
    }

    async fn assert_competition_in_scope(
        db: &PgPool,
        owner: Option<Uuid>,
        competition_id: Uuid,
    ) -> Result<(), AppError> {
        let found: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM competitions WHERE id = $1 AND ($2::uuid IS NULL OR created_by = $2)",
        )
        .bind(competition_id)
        .bind(owner)
        .fetch_optional(db)
        .await?;

        found
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Competition not found")))
    }
}
