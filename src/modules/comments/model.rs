use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::books::model::Book;

/// Comment kinds a reader can attach to a book. The wire and storage form
/// uses the spaced lowercase labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text")]
pub enum CommentType {
    #[serde(rename = "book summary")]
    #[sqlx(rename = "book summary")]
    BookSummary,
    #[serde(rename = "favorite parts")]
    #[sqlx(rename = "favorite parts")]
    FavoriteParts,
    #[serde(rename = "notes")]
    #[sqlx(rename = "notes")]
    Notes,
    #[serde(rename = "thoughts")]
    #[sqlx(rename = "thoughts")]
    Thoughts,
    #[serde(rename = "favorite quotes")]
    #[sqlx(rename = "favorite quotes")]
    FavoriteQuotes,
}

pub const COMMENT_COLUMNS: &str =
    "id, comment_type, student_id, competition_id, book_id, text, created_at, updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub comment_type: CommentType,
    pub student_id: Uuid,
    pub competition_id: Uuid,
    pub book_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    pub comment_type: CommentType,
    pub competition_id: Uuid,
    pub book_id: Uuid,
    #[validate(length(min = 1))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentDto {
    pub comment_type: Option<CommentType>,
    #[validate(length(min = 1))]
    pub text: Option<String>,
}

/// Comment with the author's name and the book it refers to.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub comment_type: CommentType,
    pub competition_id: Uuid,
    pub full_name: String,
    pub book: Book,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// One student with their comments, as surfaced to the competition owner.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentFeedback {
    pub id: Uuid,
    pub full_name: String,
    pub comments: Vec<CommentResponse>,
}

/// Comment joined with its author for the feedback query.
#[derive(Debug, FromRow)]
pub(crate) struct FeedbackRow {
    pub id: Uuid,
    pub comment_type: CommentType,
    pub student_id: Uuid,
    pub competition_id: Uuid,
    pub book_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
}
