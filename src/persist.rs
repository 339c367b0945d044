//! Schedule Persister
//!
//! Writes a generated schedule for an athlete, creating only the sessions
//! that do not exist yet. Safe to call repeatedly with the same or an
//! overlapping schedule.
//!
//! The pre-check read and the write transaction are separate steps, so a
//! concurrent caller can insert a colliding `(athlete, date)` row in between.
//! Inserts use `ON CONFLICT DO NOTHING` against the unique constraint, and any
//! row lost that way is counted as skipped instead of failing the batch.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::conflicts::schedule_dates;
use crate::error::ScheduleError;
use crate::models::ScheduledSession;
use crate::sessions::{find_existing_sessions, insert_sessions};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistRequest {
  pub athlete_id: String,
  pub program_id: String,
  pub program_assignment_id: String,
  pub schedule: Vec<ScheduledSession>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistOutcome {
  pub created: usize,
  pub skipped: usize,
  pub total: usize,
}

/// Persist every session in `request.schedule` that the athlete does not
/// already have a session for on that date.
///
/// All new rows are written in one transaction: on error nothing is kept.
pub async fn persist_schedule(
  pool: &SqlitePool,
  request: &PersistRequest,
) -> Result<PersistOutcome, ScheduleError> {
  let total = request.schedule.len();
  if total == 0 {
    return Ok(PersistOutcome::default());
  }

  // Any session on the date blocks a new one, whatever assignment owns it
  let dates = schedule_dates(&request.schedule);
  let existing: HashSet<NaiveDate> = find_existing_sessions(pool, &request.athlete_id, &dates, None)
    .await?
    .into_iter()
    .map(|s| s.date)
    .collect();

  let new_sessions: Vec<&ScheduledSession> = request
    .schedule
    .iter()
    .filter(|s| !existing.contains(&s.date))
    .collect();

  if new_sessions.is_empty() {
    debug!(
      athlete_id = %request.athlete_id,
      total,
      "All scheduled sessions already exist"
    );
    return Ok(PersistOutcome {
      created: 0,
      skipped: total,
      total,
    });
  }

  let created = commit_new_sessions(pool, request, &new_sessions).await?;

  let lost = new_sessions.len() - created;
  if lost > 0 {
    warn!(
      athlete_id = %request.athlete_id,
      lost,
      "Sessions appeared between existence check and commit; counted as skipped"
    );
  }

  info!(
    athlete_id = %request.athlete_id,
    program_assignment_id = %request.program_assignment_id,
    created,
    skipped = total - created,
    "Persisted schedule"
  );

  Ok(PersistOutcome {
    created,
    skipped: total - created,
    total,
  })
}

/// Insert `sessions` in a single transaction, returning rows written
pub(crate) async fn commit_new_sessions(
  pool: &SqlitePool,
  request: &PersistRequest,
  sessions: &[&ScheduledSession],
) -> Result<usize, ScheduleError> {
  let mut tx = pool.begin().await?;
  let written = insert_sessions(
    &mut tx,
    &request.athlete_id,
    &request.program_id,
    &request.program_assignment_id,
    sessions,
  )
  .await?;
  tx.commit().await?;

  Ok(written)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
