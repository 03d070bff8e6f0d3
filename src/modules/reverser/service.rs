use faculty_core::AppError;
use faculty_models::{CreateTextEntryDto, DEFAULT_RECENT_LIMIT, TextEntry};
use faculty_observability::track_text_entry_created;
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::validator::validate_dto;

const MAX_RECENT_LIMIT: i64 = 100;

pub struct TextEntryService;

impl TextEntryService {
    /// Validates the input, reverses it and stores the pair.
    #[instrument(skip(db, dto), fields(chars = dto.text.chars().count()))]
    pub async fn create_entry(db: &PgPool, dto: CreateTextEntryDto) -> Result<TextEntry, AppError> {
        validate_dto(&dto)?;

        let entry = TextEntry::new(dto.text);
        let entry = sqlx::query_as::<_, TextEntry>(
            r#"INSERT INTO text_entries (id, original_text, reversed_text, created_at)
               VALUES ($1, $2, $3, $4)
               RETURNING id, original_text, reversed_text, created_at"#,
        )
        .bind(entry.id)
        .bind(&entry.original_text)
        .bind(&entry.reversed_text)
        .bind(entry.created_at)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        track_text_entry_created();
        info!(entry_id = %entry.id, "Text entry created");

        Ok(entry)
    }

    /// Newest entries first. `limit` is clamped to 1..=100.
    #[instrument(skip(db))]
    pub async fn recent_entries(db: &PgPool, limit: Option<i64>) -> Result<Vec<TextEntry>, AppError> {
        let limit = clamp_limit(limit);

        sqlx::query_as::<_, TextEntry>(
            r#"SELECT id, original_text, reversed_text, created_at
               FROM text_entries
               ORDER BY created_at DESC
               LIMIT $1"#,
        )
        .bind(limit)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn all_entries(db: &PgPool) -> Result<Vec<TextEntry>, AppError> {
        sqlx::query_as::<_, TextEntry>(
            r#"SELECT id, original_text, reversed_text, created_at
               FROM text_entries
               ORDER BY created_at DESC"#,
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT)
}
