//! Reversed text entries.

use crate::ids::TextEntryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

const PREVIEW_CHARS: usize = 50;

/// Number of entries shown by default in the recent list.
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TextEntry {
    pub id: TextEntryId,
    pub original_text: String,
    pub reversed_text: String,
    pub created_at: DateTime<Utc>,
}

impl TextEntry {
    pub fn new(original_text: impl Into<String>) -> Self {
        let original_text = original_text.into();
        let reversed_text = reverse_text(&original_text);
        Self {
            id: TextEntryId::new(),
            original_text,
            reversed_text,
            created_at: Utc::now(),
        }
    }

    /// First 50 characters of the original text, with `...` when truncated.
    pub fn preview(&self) -> String {
        if self.original_text.chars().count() > PREVIEW_CHARS {
            let head: String = self.original_text.chars().take(PREVIEW_CHARS).collect();
            format!("{head}...")
        } else {
            self.original_text.clone()
        }
    }
}

/// Reverses text by Unicode scalar value.
pub fn reverse_text(text: &str) -> String {
    text.chars().rev().collect()
}

// DTOs

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTextEntryDto {
    #[validate(length(
        min = 1,
        max = 10000,
        message = "Please enter valid text (1 to 10000 characters)"
    ))]
    pub text: String,
}

impl CreateTextEntryDto {
    /// Builds the DTO from raw input, trimming surrounding whitespace.
    pub fn new(raw: &str) -> Self {
        Self {
            text: raw.trim().to_string(),
        }
    }
}
