//! Session store operations over the `sessions` table.
//!
//! `(athlete_id, date)` is unique at the database level. That constraint is
//! what keeps schedules idempotent; the existence lookups here only let
//! callers avoid writes they already know will be skipped.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::ScheduleError;
use crate::models::{ExistingSession, ScheduledSession, Session, SessionStatus};

/// Find the athlete's sessions on any of `dates`.
///
/// With `exclude_assignment_id`, sessions belonging to that assignment are
/// left out. Sessions with no assignment are always returned.
pub async fn find_existing_sessions(
  pool: &SqlitePool,
  athlete_id: &str,
  dates: &[NaiveDate],
  exclude_assignment_id: Option<&str>,
) -> Result<Vec<ExistingSession>, ScheduleError> {
  if dates.is_empty() {
    return Ok(Vec::new());
  }

  let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
    "SELECT date, title, program_id, program_assignment_id, status FROM sessions WHERE athlete_id = ",
  );
  query.push_bind(athlete_id);
  query.push(" AND date IN (");
  let mut separated = query.separated(", ");
  for date in dates {
    separated.push_bind(*date);
  }
  separated.push_unseparated(")");

  if let Some(assignment_id) = exclude_assignment_id {
    query.push(" AND (program_assignment_id IS NULL OR program_assignment_id != ");
    query.push_bind(assignment_id);
    query.push(")");
  }
  query.push(" ORDER BY date");

  let rows = query.build().fetch_all(pool).await?;
  let existing = rows
    .iter()
    .map(ExistingSession::from_row)
    .collect::<Result<Vec<_>, _>>()?;

  debug!(
    athlete_id,
    checked = dates.len(),
    found = existing.len(),
    "Looked up existing sessions"
  );

  Ok(existing)
}

/// Insert scheduled sessions inside `tx` as NOT_STARTED with zeroed progress.
///
/// Rows whose `(athlete_id, date)` already exists are left alone. Returns how
/// many rows were actually written.
pub(crate) async fn insert_sessions(
  tx: &mut Transaction<'_, Sqlite>,
  athlete_id: &str,
  program_id: &str,
  program_assignment_id: &str,
  sessions: &[&ScheduledSession],
) -> Result<usize, ScheduleError> {
  let status = SessionStatus::NotStarted.to_string();
  let mut written = 0;

  for session in sessions {
    let result = sqlx::query(
      r#"
      INSERT INTO sessions (
        athlete_id, date, program_id, program_assignment_id, workout_id,
        title, week_number, day_number, status,
        total_items, completed_items, completion_percentage
      )
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, 0, 0)
      ON CONFLICT(athlete_id, date) DO NOTHING
      "#,
    )
    .bind(athlete_id)
    .bind(session.date)
    .bind(program_id)
    .bind(program_assignment_id)
    .bind(&session.workout_id)
    .bind(&session.title)
    .bind(session.week_number)
    .bind(session.day_number)
    .bind(&status)
    .execute(&mut **tx)
    .await?;

    written += result.rows_affected() as usize;
  }

  Ok(written)
}

/// Load an athlete's sessions, optionally bounded by an inclusive date range
pub async fn load_sessions(
  pool: &SqlitePool,
  athlete_id: &str,
  from: Option<NaiveDate>,
  to: Option<NaiveDate>,
) -> Result<Vec<Session>, ScheduleError> {
  let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM sessions WHERE athlete_id = ");
  query.push_bind(athlete_id);
  if let Some(from) = from {
    query.push(" AND date >= ");
    query.push_bind(from);
  }
  if let Some(to) = to {
    query.push(" AND date <= ");
    query.push_bind(to);
  }
  query.push(" ORDER BY date");

  let rows = query.build().fetch_all(pool).await?;
  rows.iter().map(Session::from_row).collect()
}

/// Remove every session created for a program assignment
pub async fn delete_assignment_sessions(
  pool: &SqlitePool,
  program_assignment_id: &str,
) -> Result<u64, ScheduleError> {
  let result = sqlx::query("DELETE FROM sessions WHERE program_assignment_id = ?1")
    .bind(program_assignment_id)
    .execute(pool)
    .await?;

  Ok(result.rows_affected())
}
