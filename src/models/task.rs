use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::ApiError;
use crate::validation::validate_status;

/// Status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task is yet to be started. The default for new tasks.
    Pending,
    /// Task is currently being worked on.
    InProgress,
    /// Task is finished.
    Completed,
}

impl TaskStatus {
    /// Parses the wire-level name of a status. Case-sensitive, mirroring the
    /// values accepted by the `task_status` SQL enum.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PENDING" => Some(TaskStatus::Pending),
            "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "COMPLETED" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// Input structure for creating or updating a task.
///
/// Fields arrive optional so that missing values report `REQUIRED` through
/// the validation pipeline instead of failing JSON deserialization; the
/// status arrives as a string so an unknown value reports `INVALID_VALUE`
/// the same way. [`TaskPayload::validated`] converts to typed fields.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskPayload {
    #[validate(
        required(code = "REQUIRED", message = "Title is required"),
        length(
            min = 1,
            max = 255,
            code = "INVALID_LENGTH",
            message = "Title must be between 1 and 255 characters"
        )
    )]
    pub title: Option<String>,

    #[validate(length(
        max = 1000,
        code = "INVALID_LENGTH",
        message = "Description may have at most 1000 characters"
    ))]
    pub description: Option<String>,

    #[validate(custom = "validate_status")]
    pub status: Option<String>,
}

/// A task payload that passed validation, with the status defaulted to
/// `PENDING` when omitted.
pub struct ValidTask<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: TaskStatus,
}

impl TaskPayload {
    /// Runs the declarative rules and returns the validated, typed fields.
    pub fn validated(&self) -> Result<ValidTask<'_>, ApiError> {
        self.validate()?;
        let title = self
            .title
            .as_deref()
            .ok_or_else(|| ApiError::Internal("title missing after validation".into()))?;
        let status = match self.status.as_deref() {
            Some(name) => TaskStatus::from_name(name)
                .ok_or_else(|| ApiError::Internal("status unparsed after validation".into()))?,
            None => TaskStatus::Pending,
        };
        Ok(ValidTask {
            title,
            description: self.description.as_deref(),
            status,
        })
    }
}

/// A task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Identifier of the owning account. A task belongs to exactly one user.
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
