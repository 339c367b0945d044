use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::error::ScheduleError;

// ---------------------------------------------------------------------------
/// Session Status: how far the athlete got through a session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
  #[default]
  NotStarted,
  PartiallyCompleted,
  FullyCompleted,
}

impl std::fmt::Display for SessionStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::NotStarted => write!(f, "NOT_STARTED"),
      Self::PartiallyCompleted => write!(f, "PARTIALLY_COMPLETED"),
      Self::FullyCompleted => write!(f, "FULLY_COMPLETED"),
    }
  }
}

impl std::str::FromStr for SessionStatus {
  type Err = ScheduleError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "NOT_STARTED" => Ok(Self::NotStarted),
      "PARTIALLY_COMPLETED" => Ok(Self::PartiallyCompleted),
      "FULLY_COMPLETED" => Ok(Self::FullyCompleted),
      _ => Err(ScheduleError::UnknownStatus(s.to_string())),
    }
  }
}

/// A stored session row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  pub id: i64,
  pub athlete_id: String,
  pub date: NaiveDate,
  pub program_id: Option<String>,
  pub program_assignment_id: Option<String>,
  pub workout_id: Option<String>,
  pub title: String,
  pub week_number: Option<i32>,
  pub day_number: Option<i32>,
  pub status: SessionStatus,
  pub total_items: i64,
  pub completed_items: i64,
  pub completion_percentage: f64,
  pub created_at: Option<NaiveDateTime>,
}

impl Session {
  pub(crate) fn from_row(row: &SqliteRow) -> Result<Self, ScheduleError> {
    let status: String = row.try_get("status")?;
    Ok(Self {
      id: row.try_get("id")?,
      athlete_id: row.try_get("athlete_id")?,
      date: row.try_get("date")?,
      program_id: row.try_get("program_id")?,
      program_assignment_id: row.try_get("program_assignment_id")?,
      workout_id: row.try_get("workout_id")?,
      title: row.try_get("title")?,
      week_number: row.try_get("week_number")?,
      day_number: row.try_get("day_number")?,
      status: status.parse()?,
      total_items: row.try_get("total_items")?,
      completed_items: row.try_get("completed_items")?,
      completion_percentage: row.try_get("completion_percentage")?,
      created_at: row.try_get("created_at")?,
    })
  }
}

/// The slice of a stored session that existence checks need
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingSession {
  pub date: NaiveDate,
  pub title: String,
  pub program_id: Option<String>,
  pub program_assignment_id: Option<String>,
  pub status: SessionStatus,
}

impl ExistingSession {
  pub(crate) fn from_row(row: &SqliteRow) -> Result<Self, ScheduleError> {
    let status: String = row.try_get("status")?;
    Ok(Self {
      date: row.try_get("date")?,
      title: row.try_get("title")?,
      program_id: row.try_get("program_id")?,
      program_assignment_id: row.try_get("program_assignment_id")?,
      status: status.parse()?,
    })
  }
}
