use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One prescribed training day of a program, before it has a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutInput {
  pub id: String,
  pub week_number: i32,
  pub day_number: i32,
  pub name: String,
}

/// A workout pinned to a calendar day (not stored until persisted)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSession {
  pub date: NaiveDate,
  pub workout_id: String,
  pub week_number: i32,
  pub day_number: i32,
  pub title: String,
}
