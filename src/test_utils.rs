//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Session seeding
//! - Program/workout factories
//! - Date helpers

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::{SessionStatus, WorkoutInput};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// A pre-existing session to put in the store before a test runs
pub struct SeedSession {
  pub athlete_id: String,
  pub date: NaiveDate,
  pub title: String,
  pub program_id: Option<String>,
  pub program_assignment_id: Option<String>,
  pub status: SessionStatus,
}

impl SeedSession {
  pub fn new(athlete_id: &str, date: NaiveDate, title: &str) -> Self {
    Self {
      athlete_id: athlete_id.to_string(),
      date,
      title: title.to_string(),
      program_id: None,
      program_assignment_id: None,
      status: SessionStatus::NotStarted,
    }
  }

  pub fn assignment(mut self, program_id: &str, program_assignment_id: &str) -> Self {
    self.program_id = Some(program_id.to_string());
    self.program_assignment_id = Some(program_assignment_id.to_string());
    self
  }

  pub fn status(mut self, status: SessionStatus) -> Self {
    self.status = status;
    self
  }
}

/// Insert a session row directly, bypassing the persister
pub async fn seed_session(pool: &SqlitePool, seed: SeedSession) -> i64 {
  let result = sqlx::query(
    r#"
    INSERT INTO sessions (athlete_id, date, program_id, program_assignment_id, title, status)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
  )
  .bind(&seed.athlete_id)
  .bind(seed.date)
  .bind(&seed.program_id)
  .bind(&seed.program_assignment_id)
  .bind(&seed.title)
  .bind(seed.status.to_string())
  .execute(pool)
  .await
  .expect("Failed to seed session");

  result.last_insert_rowid()
}

/// Count every stored session for an athlete
pub async fn count_sessions(pool: &SqlitePool, athlete_id: &str) -> i64 {
  sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE athlete_id = ?1")
    .bind(athlete_id)
    .fetch_one(pool)
    .await
    .expect("Failed to count sessions")
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_workout(id: &str, week_number: i32, day_number: i32, name: &str) -> WorkoutInput {
  WorkoutInput {
    id: id.to_string(),
    week_number,
    day_number,
    name: name.to_string(),
  }
}

/// A program of `weeks` weeks with `days_per_week` workouts each, in order
pub fn mock_program(weeks: i32, days_per_week: i32) -> Vec<WorkoutInput> {
  (1..=weeks)
    .flat_map(|week| {
      (1..=days_per_week).map(move |day| {
        mock_workout(
          &format!("w{}d{}", week, day),
          week,
          day,
          &format!("Week {} Day {}", week, day),
        )
      })
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> =
      sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = 'sessions'")
        .fetch_all(&pool)
        .await
        .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_session_is_counted() {
    let pool = setup_test_db().await;

    seed_session(&pool, SeedSession::new("ath-1", date(2026, 10, 19), "Squat")).await;
    seed_session(
      &pool,
      SeedSession::new("ath-1", date(2026, 10, 20), "Bench").status(SessionStatus::FullyCompleted),
    )
    .await;

    assert_eq!(count_sessions(&pool, "ath-1").await, 2);
    assert_eq!(count_sessions(&pool, "ath-2").await, 0);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_program_is_ordered() {
    let program = mock_program(2, 3);
    assert_eq!(program.len(), 6);
    assert_eq!(program[0].id, "w1d1");
    assert_eq!(program[5].week_number, 2);
    assert_eq!(program[5].day_number, 3);
  }
}
