use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{ACHIEVEMENT_COLUMNS, Achievement, CreateAchievementDto};
use crate::utils::errors::AppError;

pub struct AchievementService;

impl AchievementService {
    #[instrument(skip(db, dto))]
    pub async fn create_achievement(
        db: &PgPool,
        user_id: Uuid,
        dto: CreateAchievementDto,
    ) -> Result<Achievement, AppError> {
        let query = format!(
            "INSERT INTO achievements (user_id, name) VALUES ($1, $2) RETURNING {}",
            ACHIEVEMENT_COLUMNS
        );

        let achievement = sqlx::query_as::<_, Achievement>(&query)
            .bind(user_id)
            .bind(&dto.name)
            .fetch_one(db)
            .await?;

        Ok(achievement)
    }

    #[instrument(skip(db))]
    pub async fn get_achievements(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<Achievement>, AppError> {
        let query = format!(
            "SELECT {} FROM achievements WHERE user_id = $1 ORDER BY created_at DESC",
            ACHIEVEMENT_COLUMNS
        );

        let achievements = sqlx::query_as::<_, Achievement>(&query)
            .bind(user_id)
            .fetch_all(db)
            .await?;

        Ok(achievements)
    }

    #[instrument(skip(db))]
    pub async fn delete_achievement(
        db: &PgPool,
        user_id: Uuid,
        achievement_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM achievements WHERE id = $1 AND user_id = $2")
            .bind(achievement_id)
            .bind(user_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Achievement not found")));
        }

        Ok(())
    }
}
