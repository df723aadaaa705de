use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const NOTIFICATION_COLUMNS: &str = "id, competition_id, user_id, text, created_at";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNotificationDto {
    pub competition_id: Uuid,
    #[validate(length(min = 1))]
    pub text: String,
}

/// One inbox entry: a competition the caller belongs to, with its
/// notifications.
#[derive(Debug, Serialize, ToSchema)]
pub struct InboxEntry {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, FromRow)]
pub(crate) struct InboxRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
