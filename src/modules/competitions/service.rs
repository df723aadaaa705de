use std::collections::HashMap;

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::books::model::Book;
use crate::modules::competitions::model::{
    Competition, CompetitionWithBooks, CreateCompetitionDto, StudentCompetition,
    StudentCompetitionRow, UpdateCompetitionDto,
};
use crate::utils::errors::AppError;

const COMPETITION_COLUMNS: &str =
    "id, title, description, created_by, start_date, end_date, created_at, updated_at";

const BOOK_COLUMNS: &str =
    "id, competition_id, title, author, category, file_url, created_at, updated_at";

pub struct CompetitionService;

impl CompetitionService {
    #[instrument(skip(db, dto))]
    pub async fn create_competition(
        db: &PgPool,
        creator_id: Uuid,
        dto: CreateCompetitionDto,
    ) -> Result<Competition, AppError> {
        if dto.end_date < dto.start_date {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "end_date must not be before start_date"
            )));
        }

        let query = format!(
            "INSERT INTO competitions (title, description, created_by, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            COMPETITION_COLUMNS
        );

        let competition = sqlx::query_as::<_, Competition>(&query)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(creator_id)
            .bind(dto.start_date)
            .bind(dto.end_date)
            .fetch_one(db)
            .await?;

        Ok(competition)
    }

    /// Owner-facing list. `owner` is `None` for admins.
    #[instrument(skip(db))]
    pub async fn get_competitions(
        db: &PgPool,
        owner: Option<Uuid>,
    ) -> Result<Vec<Competition>, AppError> {
        let query = format!(
            "SELECT {} FROM competitions
             WHERE $1::uuid IS NULL OR created_by = $1
             ORDER BY created_at DESC",
            COMPETITION_COLUMNS
        );

        let competitions = sqlx::query_as::<_, Competition>(&query)
            .bind(owner)
            .fetch_all(db)
            .await?;

        Ok(competitions)
    }

    #[instrument(skip(db))]
    pub async fn get_competition(
        db: &PgPool,
        owner: Option<Uuid>,
        competition_id: Uuid,
    ) -> Result<CompetitionWithBooks, AppError> {
        let query = format!(
            "SELECT {} FROM competitions
             WHERE id = $1 AND ($2::uuid IS NULL OR created_by = $2)",
            COMPETITION_COLUMNS
        );

        let competition = sqlx::query_as::<_, Competition>(&query)
            .bind(competition_id)
            .bind(owner)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Competition not found")))?;

        let books_query = format!(
            "SELECT {} FROM books WHERE competition_id = $1 ORDER BY created_at",
            BOOK_COLUMNS
        );
        let books = sqlx::query_as::<_, Book>(&books_query)
            .bind(competition_id)
            .fetch_all(db)
            .await?;

        Ok(CompetitionWithBooks {
            id: competition.id,
            title: competition.title,
            description: competition.description,
            created_by: competition.created_by,
            start_date: competition.start_date,
            end_date: competition.end_date,
            books,
            created_at: competition.created_at,
        })
    }

    #[instrument(skip(db, dto))]
    pub async fn update_competition(
        db: &PgPool,
        owner: Option<Uuid>,
        competition_id: Uuid,
        dto: UpdateCompetitionDto,
    ) -> Result<Competition, AppError> {
        let current = Self::get_competition(db, owner, competition_id).await?;

        let start_date = dto.start_date.unwrap_or(current.start_date);
        let end_date = dto.end_date.unwrap_or(current.end_date);
        if end_date < start_date {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "end_date must not be before start_date"
            )));
        }

        let query = format!(
            "UPDATE competitions
             SET title = $2, description = $3, start_date = $4, end_date = $5, updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            COMPETITION_COLUMNS
        );

        let competition = sqlx::query_as::<_, Competition>(&query)
            .bind(competition_id)
            .bind(dto.title.unwrap_or(current.title))
            .bind(dto.description.unwrap_or(current.description))
            .bind(start_date)
            .bind(end_date)
            .fetch_one(db)
            .await?;

        Ok(competition)
    }

    #[instrument(skip(db))]
    pub async fn delete_competition(
        db: &PgPool,
        owner: Option<Uuid>,
        competition_id: Uuid,
    ) -> Result<(), AppError> {
        Self::get_competition(db, owner, competition_id).await?;

        sqlx::query("DELETE FROM competitions WHERE id = $1")
            .bind(competition_id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Student catalog: every competition, its reading list, the creator's
    /// name, and whether the caller already holds a registration.
    #[instrument(skip(db))]
    pub async fn get_student_catalog(
        db: &PgPool,
        caller_id: Uuid,
    ) -> Result<Vec<StudentCompetition>, AppError> {
        let rows = sqlx::query_as::<_, StudentCompetitionRow>(
            "SELECT c.id, c.title, c.description, c.start_date, c.end_date,
                    u.first_name, u.last_name,
                    EXISTS (
                        SELECT 1 FROM competition_registrations r
                        WHERE r.competition_id = c.id AND r.student_id = $1
                    ) AS is_registered
             FROM competitions c
             JOIN users u ON u.id = c.created_by
             ORDER BY c.created_at DESC",
        )
        .bind(caller_id)
        .fetch_all(db)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let books_query = format!(
            "SELECT {} FROM books WHERE competition_id = ANY($1) ORDER BY created_at",
            BOOK_COLUMNS
        );
        let books = sqlx::query_as::<_, Book>(&books_query)
            .bind(&ids)
            .fetch_all(db)
            .await?;

        let mut books_by_competition: HashMap<Uuid, Vec<Book>> = HashMap::new();
        for book in books {
            books_by_competition
                .entry(book.competition_id)
                .or_default()
                .push(book);
        }

        Ok(rows
            .into_iter()
            .map(|row| StudentCompetition {
                books: books_by_competition.remove(&row.id).unwrap_or_default(),
                full_name: format!("{} {}", row.first_name, row.last_name),
                id: row.id,
                title: row.title,
                description: row.description,
                start_date: row.start_date,
                end_date: row.end_date,
                is_registered: row.is_registered,
            })
            .collect())
    }

    #[instrument(skip(db))]
    pub async fn get_student_competition(
        db: &PgPool,
        caller_id: Uuid,
        competition_id: Uuid,
    ) -> Result<StudentCompetition, AppError> {
        let row = sqlx::query_as::<_, StudentCompetitionRow>(
            "SELECT c.id, c.title, c.description, c.start_date, c.end_date,
                    u.first_name, u.last_name,
                    EXISTS (
                        SELECT 1 FROM competition_registrations r
                        WHERE r.competition_id = c.id AND r.student_id = $1
                    ) AS is_registered
             FROM competitions c
             JOIN users u ON u.id = c.created_by
             WHERE c.id = $2",
        )
        .bind(caller_id)
        .bind(competition_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Competition not found")))?;

        let books_query = format!(
            "SELECT {} FROM books WHERE competition_id = $1 ORDER BY created_at",
            BOOK_COLUMNS
        );
        let books = sqlx::query_as::<_, Book>(&books_query)
            .bind(competition_id)
            .fetch_all(db)
            .await?;

        Ok(StudentCompetition {
            books,
            full_name: format!("{} {}", row.first_name, row.last_name),
            id: row.id,
            title: row.title,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            is_registered: row.is_registered,
        })
    }
}
