use std::collections::HashMap;

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    CreateNotificationDto, InboxEntry, InboxRow, NOTIFICATION_COLUMNS, Notification,
};
use crate::utils::errors::AppError;

pub struct NotificationService;

impl NotificationService {
    /// The notification is always attributed to the caller; the payload
    /// cannot impersonate another user.
    #[instrument(skip(db, dto))]
    pub async fn create_notification(
        db: &PgPool,
        caller_id: Uuid,
        dto: CreateNotificationDto,
    ) -> Result<Notification, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM competitions WHERE id = $1)")
                .bind(dto.competition_id)
                .fetch_one(db)
                .await?;
        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Competition not found")));
        }

        let query = format!(
            "INSERT INTO notifications (competition_id, user_id, text)
             VALUES ($1, $2, $3)
             RETURNING {}",
            NOTIFICATION_COLUMNS
        );

        let notification = sqlx::query_as::<_, Notification>(&query)
            .bind(dto.competition_id)
            .bind(caller_id)
            .bind(&dto.text)
            .fetch_one(db)
            .await?;

        Ok(notification)
    }

    #[instrument(skip(db))]
    pub async fn get_notifications(
        db: &PgPool,
        caller_id: Uuid,
    ) -> Result<Vec<Notification>, AppError> {
        let query = format!(
            "SELECT {} FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
            NOTIFICATION_COLUMNS
        );

        let notifications = sqlx::query_as::<_, Notification>(&query)
            .bind(caller_id)
            .fetch_all(db)
            .await?;

        Ok(notifications)
    }

    /// Competitions the caller is registered in or created, each with its
    /// notifications.
    #[instrument(skip(db))]
    pub async fn get_inbox(db: &PgPool, caller_id: Uuid) -> Result<Vec<InboxEntry>, AppError> {
        let rows = sqlx::query_as::<_, InboxRow>(
            "SELECT c.id, c.title, c.description, c.start_date, c.end_date
             FROM competitions c
             WHERE c.created_by = $1
                OR EXISTS (
                    SELECT 1 FROM competition_registrations r
                    WHERE r.competition_id = c.id AND r.student_id = $1
                )
             ORDER BY c.created_at DESC",
        )
        .bind(caller_id)
        .fetch_all(db)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let notifications_query = format!(
            "SELECT {} FROM notifications WHERE competition_id = ANY($1) ORDER BY created_at DESC",
            NOTIFICATION_COLUMNS
        );
        let notifications = sqlx::query_as::<_, Notification>(&notifications_query)
            .bind(&ids)
            .fetch_all(db)
            .await?;

        let mut by_competition: HashMap<Uuid, Vec<Notification>> = HashMap::new();
        for notification in notifications {
            by_competition
                .entry(notification.competition_id)
                .or_default()
                .push(notification);
        }

        Ok(rows
            .into_iter()
            .map(|row| InboxEntry {
                notifications: by_competition.remove(&row.id).unwrap_or_default(),
                id: row.id,
                title: row.title,
                description: row.description,
                start_date: row.start_date,
                end_date: row.end_date,
            })
            .collect())
    }
}
