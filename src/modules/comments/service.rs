use std::collections::HashMap;

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    COMMENT_COLUMNS, Comment, CommentResponse, CreateCommentDto, FeedbackRow, StudentFeedback,
    UpdateCommentDto,
};
use crate::modules::books::model::Book;
use crate::utils::errors::AppError;

const BOOK_COLUMNS: &str =
    "id, competition_id, title, author, category, file_url, created_at, updated_at";

pub struct CommentService;

impl CommentService {
    #[instrument(skip(db, dto))]
    pub async fn create_comment(
        db: &PgPool,
        student_id: Uuid,
        dto: CreateCommentDto,
    ) -> Result<CommentResponse, AppError> {
        let book_query = format!(
            "SELECT {} FROM books WHERE id = $1 AND competition_id = $2",
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&book_query)
            .bind(dto.book_id)
            .bind(dto.competition_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Book not found")))?;

        let query = format!(
            "INSERT INTO student_comments (comment_type, student_id, competition_id, book_id, text)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            COMMENT_COLUMNS
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(dto.comment_type)
            .bind(student_id)
            .bind(dto.competition_id)
            .bind(dto.book_id)
            .bind(&dto.text)
            .fetch_one(db)
            .await?;

        let full_name = Self::full_name(db, student_id).await?;

        Ok(Self::to_response(comment, full_name, book))
    }

    #[instrument(skip(db))]
    pub async fn get_comments(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<CommentResponse>, AppError> {
        let query = format!(
            "SELECT {} FROM student_comments
             WHERE student_id = $1
             ORDER BY created_at DESC",
            COMMENT_COLUMNS
        );
        let comments = sqlx::query_as::<_, Comment>(&query)
            .bind(student_id)
            .fetch_all(db)
            .await?;

        if comments.is_empty() {
            return Ok(Vec::new());
        }

        let full_name = Self::full_name(db, student_id).await?;
        let books = Self::books_by_id(db, comments.iter().map(|c| c.book_id)).await?;

        let mut responses = Vec::with_capacity(comments.len());
        for comment in comments {
            if let Some(book) = books.get(&comment.book_id).cloned() {
                responses.push(Self::to_response(comment, full_name.clone(), book));
            }
        }

        Ok(responses)
    }

    #[instrument(skip(db))]
    pub async fn get_comment(
        db: &PgPool,
        student_id: Uuid,
        comment_id: Uuid,
    ) -> Result<CommentResponse, AppError> {
        let comment = Self::fetch_scoped(db, student_id, comment_id).await?;

        let book_query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let book = sqlx::query_as::<_, Book>(&book_query)
            .bind(comment.book_id)
            .fetch_one(db)
            .await?;

        let full_name = Self::full_name(db, student_id).await?;

        Ok(Self::to_response(comment, full_name, book))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_comment(
        db: &PgPool,
        student_id: Uuid,
        comment_id: Uuid,
        dto: UpdateCommentDto,
    ) -> Result<CommentResponse, AppError> {
        let current = Self::fetch_scoped(db, student_id, comment_id).await?;

        let query = format!(
            "UPDATE student_comments
             SET comment_type = $2, text = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            COMMENT_COLUMNS
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(comment_id)
            .bind(dto.comment_type.unwrap_or(current.comment_type))
            .bind(dto.text.unwrap_or(current.text))
            .fetch_one(db)
            .await?;

        let book_query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let book = sqlx::query_as::<_, Book>(&book_query)
            .bind(comment.book_id)
            .fetch_one(db)
            .await?;

        let full_name = Self::full_name(db, student_id).await?;

        Ok(Self::to_response(comment, full_name, book))
    }

    #[instrument(skip(db))]
    pub async fn delete_comment(
        db: &PgPool,
        student_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM student_comments WHERE id = $1 AND student_id = $2")
            .bind(comment_id)
            .bind(student_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Comment not found")));
        }

        Ok(())
    }

    /// Comments on the owner's competitions, grouped by student. `owner` is
    /// `None` for admins.
    #[instrument(skip(db))]
    pub async fn get_student_feedback(
        db: &PgPool,
        owner: Option<Uuid>,
    ) -> Result<Vec<StudentFeedback>, AppError> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            "SELECT sc.id, sc.comment_type, sc.student_id, sc.competition_id, sc.book_id,
                    sc.text, sc.created_at, u.first_name, u.last_name
             FROM student_comments sc
             JOIN competitions c ON c.id = sc.competition_id
             JOIN users u ON u.id = sc.student_id
             WHERE $1::uuid IS NULL OR c.created_by = $1
             ORDER BY u.id, sc.created_at DESC",
        )
        .bind(owner)
        .fetch_all(db)
        .await?;

        let books = Self::books_by_id(db, rows.iter().map(|r| r.book_id)).await?;

        let mut feedback: Vec<StudentFeedback> = Vec::new();
        for row in rows {
            let Some(book) = books.get(&row.book_id).cloned() else {
                continue;
            };
            let full_name = format!("{} {}", row.first_name, row.last_name);
            let response = CommentResponse {
                id: row.id,
                comment_type: row.comment_type,
                competition_id: row.competition_id,
                full_name: full_name.clone(),
                book,
                text: row.text,
                created_at: row.created_at,
            };

            match feedback.last_mut() {
                Some(entry) if entry.id == row.student_id => entry.comments.push(response),
                _ => feedback.push(StudentFeedback {
                    id: row.student_id,
                    full_name,
                    comments: vec![response],
                }),
            }
        }

        Ok(feedback)
    }

    async fn fetch_scoped(
        db: &PgPool,
        student_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Comment, AppError> {
        let query = format!(
            "SELECT {} FROM student_comments WHERE id = $1 AND student_id = $2",
            COMMENT_COLUMNS
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(comment_id)
            .bind(student_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Comment not found")))
    }

    async fn full_name(db: &PgPool, user_id: Uuid) -> Result<String, AppError> {
        let name: String =
            sqlx::query_scalar("SELECT first_name || ' ' || last_name FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_one(db)
                .await?;
        Ok(name)
    }

    async fn books_by_id(
        db: &PgPool,
        ids: impl Iterator<Item = Uuid>,
    ) -> Result<HashMap<Uuid, Book>, AppError> {
        let ids: Vec<Uuid> = ids.collect();
        let query = format!("SELECT {} FROM books WHERE id = ANY($1)", BOOK_COLUMNS);
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(&ids)
            .fetch_all(db)
            .await?;

        Ok(books.into_iter().map(|b| (b.id, b)).collect())
    }

    fn to_response(comment: Comment, full_name: String, book: Book) -> CommentResponse {
        CommentResponse {
            id: comment.id,
            comment_type: comment.comment_type,
            competition_id: comment.competition_id,
            full_name,
            book,
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}
