use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{CreateDailyPageDto, DAILY_PAGE_COLUMNS, DailyPage};
use crate::utils::errors::AppError;

pub struct DailyPageService;

impl DailyPageService {
    #[instrument(skip(db, dto))]
    pub async fn create_daily_page(
        db: &PgPool,
        user_id: Uuid,
        dto: CreateDailyPageDto,
    ) -> Result<DailyPage, AppError> {
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
            "INSERT INTO daily_pages (user_id, competition_id, book_id, page)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            DAILY_PAGE_COLUMNS
        );

        let entry = sqlx::query_as::<_, DailyPage>(&query)
            .bind(user_id)
            .bind(dto.competition_id)
            .bind(dto.book_id)
            .bind(dto.page)
            .fetch_one(db)
            .await?;

        Ok(entry)
    }

    #[instrument(skip(db))]
    pub async fn get_daily_pages(db: &PgPool, user_id: Uuid) -> Result<Vec<DailyPage>, AppError> {
        let query = format!(
            "SELECT {} FROM daily_pages WHERE user_id = $1 ORDER BY created_at DESC",
            DAILY_PAGE_COLUMNS
        );

        let entries = sqlx::query_as::<_, DailyPage>(&query)
            .bind(user_id)
            .fetch_all(db)
            .await?;

        Ok(entries)
    }
}
