use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A stored todo item. Each row belongs to exactly one user, and every
/// query against the table carries that owner in its WHERE clause.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a todo. `completed` starts false and timestamps
/// are set by the store.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoInput {
    /// Must contain at least one non-whitespace character.
    #[validate(length(max = 200), custom = "title_not_blank")]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Partial update. Absent fields leave the stored value unchanged; an
/// empty patch is valid and only bumps `updated_at`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoPatch {
    #[validate(length(max = 200), custom = "title_not_blank")]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub completed: Option<bool>,
}

fn title_not_blank(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("title_must_not_be_blank"));
    }
    Ok(())
}
