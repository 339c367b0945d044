//! Conflict detection: report existing sessions that a new schedule would
//! land on. Read-only and advisory; nothing here prevents a later write.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::ScheduleError;
use crate::models::{ConflictReport, ConflictingSession, ExistingSession, ScheduledSession};
use crate::sessions::find_existing_sessions;

/// Dates in `schedule`, de-duplicated and ascending
pub(crate) fn schedule_dates(schedule: &[ScheduledSession]) -> Vec<NaiveDate> {
  schedule
    .iter()
    .map(|s| s.date)
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}

/// Check a proposed schedule against the athlete's stored sessions.
///
/// Sessions under `exclude_assignment_id` are not conflicts (re-assigning a
/// program does not collide with itself). Sessions without any assignment
/// always count.
pub async fn detect_conflicts(
  pool: &SqlitePool,
  athlete_id: &str,
  schedule: &[ScheduledSession],
  exclude_assignment_id: Option<&str>,
) -> Result<ConflictReport, ScheduleError> {
  if schedule.is_empty() {
    return Ok(ConflictReport::default());
  }

  let dates = schedule_dates(schedule);
  let existing = find_existing_sessions(pool, athlete_id, &dates, exclude_assignment_id).await?;
  let conflicts = collect_conflicts(schedule, &existing);

  if conflicts.is_empty() {
    debug!(athlete_id, proposed = schedule.len(), "No schedule conflicts");
  } else {
    warn!(
      athlete_id,
      conflicts = conflicts.len(),
      "Proposed schedule overlaps existing sessions"
    );
  }

  Ok(ConflictReport::from_conflicts(conflicts))
}

fn collect_conflicts(
  schedule: &[ScheduledSession],
  existing: &[ExistingSession],
) -> Vec<ConflictingSession> {
  let by_date: HashMap<NaiveDate, &ExistingSession> =
    existing.iter().map(|s| (s.date, s)).collect();

  schedule
    .iter()
    .filter_map(|proposed| {
      let prior = by_date.get(&proposed.date)?;
      Some(ConflictingSession {
        date: proposed.date,
        existing_title: prior.title.clone(),
        existing_program_id: prior.program_id.clone(),
        existing_program_assignment_id: prior.program_assignment_id.clone(),
        existing_status: prior.status,
        new_title: proposed.title.clone(),
      })
    })
    .collect()
}
