use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{BookRating, CreateBookRatingDto, RATING_COLUMNS};
use crate::utils::errors::AppError;

pub struct BookRatingService;

impl BookRatingService {
    #[instrument(skip(db, dto))]
    pub async fn create_rating(
        db: &PgPool,
        user_id: Uuid,
        dto: CreateBookRatingDto,
    ) -> Result<BookRating, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM books WHERE id = $1 AND competition_id = $2)",
        )
        .bind(dto.book_id)
        .bind(dto.competition_id)
        .fetch_one(db)
        .await?;
        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Book not found")));
        }

        let query = format!(
            "INSERT INTO book_ratings (user_id, competition_id, book_id, rating)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            RATING_COLUMNS
        );

        let rating = sqlx::query_as::<_, BookRating>(&query)
            .bind(user_id)
            .bind(dto.competition_id)
            .bind(dto.book_id)
            .bind(dto.rating)
            .fetch_one(db)
            .await?;

        Ok(rating)
    }

    #[instrument(skip(db))]
    pub async fn get_ratings(db: &PgPool, user_id: Uuid) -> Result<Vec<BookRating>, AppError> {
        let query = format!(
            "SELECT {} FROM book_ratings WHERE user_id = $1 ORDER BY created_at DESC",
            RATING_COLUMNS
        );

        let ratings = sqlx::query_as::<_, BookRating>(&query)
            .bind(user_id)
            .fetch_all(db)
            .await?;

        Ok(ratings)
    }
}
