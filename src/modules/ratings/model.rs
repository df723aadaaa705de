use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const RATING_COLUMNS: &str = "id, user_id, competition_id, book_id, rating, created_at";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookRating {
    pub id: Uuid,
    pub user_id: Uuid,
    pub competition_id: Uuid,
    pub book_id: Uuid,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookRatingDto {
    pub competition_id: Uuid,
    pub book_id: Uuid,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
}
