use std::collections::HashMap;

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    AttendanceEntry, CreateRegistrationDto, REGISTRATION_COLUMNS, Registration,
    RegistrationResponse,
};
use crate::modules::notifications::model::{NOTIFICATION_COLUMNS, Notification};
use crate::utils::errors::AppError;

pub struct RegistrationService;

impl RegistrationService {
    /// Uniqueness of (student, competition) is enforced by the database, not
    /// a pre-check, so concurrent duplicates cannot slip through.
    #[instrument(skip(db, dto))]
    pub async fn register(
        db: &PgPool,
        student_id: Uuid,
        dto: CreateRegistrationDto,
    ) -> Result<RegistrationResponse, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM competitions WHERE id = $1)")
                .bind(dto.competition_id)
                .fetch_one(db)
                .await?;
        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Competition not found")));
        }

        let query = format!(
            "INSERT INTO competition_registrations (student_id, competition_id, student_cart, group_number)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            REGISTRATION_COLUMNS
        );

        let registration = sqlx::query_as::<_, Registration>(&query)
            .bind(student_id)
            .bind(dto.competition_id)
            .bind(&dto.student_cart)
            .bind(&dto.group_number)
            .fetch_one(db)
            .await
            .map_err(|err| {
                if let sqlx::Error::Database(db_err) = &err
                    && db_err.is_unique_violation()
                {
                    AppError::conflict(anyhow::anyhow!(
                        "You have already registered for this competition."
                    ))
                } else {
                    AppError::from(err)
                }
            })?;

        let notifications = Self::competition_notifications(db, registration.competition_id).await?;

        Ok(RegistrationResponse::from_parts(registration, notifications))
    }

    #[instrument(skip(db))]
    pub async fn get_registrations(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<RegistrationResponse>, AppError> {
        let query = format!(
            "SELECT {} FROM competition_registrations
             WHERE student_id = $1
             ORDER BY created_at DESC",
            REGISTRATION_COLUMNS
        );

        let registrations = sqlx::query_as::<_, Registration>(&query)
            .bind(student_id)
            .fetch_all(db)
            .await?;

        let competition_ids: Vec<Uuid> =
            registrations.iter().map(|r| r.competition_id).collect();
        let notifications_query = format!(
            "SELECT {} FROM notifications WHERE competition_id = ANY($1) ORDER BY created_at DESC",
            NOTIFICATION_COLUMNS
        );
        let notifications = sqlx::query_as::<_, Notification>(&notifications_query)
            .bind(&competition_ids)
            .fetch_all(db)
            .await?;

        let mut by_competition: HashMap<Uuid, Vec<Notification>> = HashMap::new();
        for notification in notifications {
            by_competition
                .entry(notification.competition_id)
                .or_default()
                .push(notification);
        }

        Ok(registrations
            .into_iter()
            .map(|registration| {
                let notifications = by_competition
                    .get(&registration.competition_id)
                    .cloned()
                    .unwrap_or_default();
                RegistrationResponse::from_parts(registration, notifications)
            })
            .collect())
    }

    #[instrument(skip(db))]
    pub async fn delete_registration(
        db: &PgPool,
        student_id: Uuid,
        registration_id: Uuid,
    ) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM competition_registrations WHERE id = $1 AND student_id = $2")
                .bind(registration_id)
                .bind(student_id)
                .execute(db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Registration not found")));
        }

        Ok(())
    }

    /// Registrations on the owner's competitions. `owner` is `None` for
    /// admins.
    #[instrument(skip(db))]
    pub async fn get_attendance(
        db: &PgPool,
        owner: Option<Uuid>,
    ) -> Result<Vec<AttendanceEntry>, AppError> {
        let entries = sqlx::query_as::<_, AttendanceEntry>(
            "SELECT r.group_number, r.student_cart,
                    u.first_name || ' ' || u.last_name AS full_name
             FROM competition_registrations r
             JOIN competitions c ON c.id = r.competition_id
             JOIN users u ON u.id = r.student_id
             WHERE $1::uuid IS NULL OR c.created_by = $1
             ORDER BY r.created_at DESC",
        )
        .bind(owner)
        .fetch_all(db)
        .await?;

        Ok(entries)
    }

    async fn competition_notifications(
        db: &PgPool,
        competition_id: Uuid,
    ) -> Result<Vec<Notification>, AppError> {
        let query = format!(
            "SELECT {} FROM notifications WHERE competition_id = $1 ORDER BY created_at DESC",
            NOTIFICATION_COLUMNS
        );

        let notifications = sqlx::query_as::<_, Notification>(&query)
            .bind(competition_id)
            .fetch_all(db)
            .await?;

        Ok(notifications)
    }
}
