use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::books::model::Book;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_by: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCompetitionDto {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCompetitionDto {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Owner-facing detail: the competition with its reading list.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompetitionWithBooks {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_by: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub books: Vec<Book>,
    pub created_at: DateTime<Utc>,
}

/// Student-facing catalog entry: creator name, reading list, and whether the
/// caller is already registered.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentCompetition {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub full_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_registered: bool,
    pub books: Vec<Book>,
}

/// Intermediate row for the student catalog query.
#[derive(Debug, FromRow)]
pub(crate) struct StudentCompetitionRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub first_name: String,
    pub last_name: String,
    pub is_registered: bool,
}
