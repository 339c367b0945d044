//! Assign-program workflow: generate, check, then commit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;

use crate::calendar::TrainingDays;
use crate::conflicts::detect_conflicts;
use crate::error::ScheduleError;
use crate::models::{ConflictReport, ScheduledSession, WorkoutInput};
use crate::persist::{persist_schedule, PersistOutcome, PersistRequest};
use crate::schedule::generate;
use crate::sessions::delete_assignment_sessions;

/// What to do when the new schedule lands on dates that already have sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
  /// Write the schedule anyway; occupied dates keep their existing session
  #[default]
  Proceed,
  /// Write nothing and hand the conflicts back
  Abort,
}

#[derive(Debug, Clone)]
pub struct AssignProgram {
  pub athlete_id: String,
  pub program_id: String,
  pub program_assignment_id: String,
  pub start_date: NaiveDate,
  pub training_days: TrainingDays,
  pub workouts: Vec<WorkoutInput>,
  pub on_conflict: ConflictPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentOutcome {
  pub schedule: Vec<ScheduledSession>,
  pub conflicts: ConflictReport,
  /// `None` when the assignment was aborted on conflict
  pub persisted: Option<PersistOutcome>,
}

/// Generate a schedule without touching the store
pub fn preview_schedule(
  workouts: &[WorkoutInput],
  start_date: NaiveDate,
  training_days: &TrainingDays,
) -> Vec<ScheduledSession> {
  generate(workouts, start_date, training_days.as_slice())
}

/// Assign a program to an athlete and create its sessions
pub async fn assign_program(
  pool: &SqlitePool,
  assignment: &AssignProgram,
) -> Result<AssignmentOutcome, ScheduleError> {
  let schedule = preview_schedule(
    &assignment.workouts,
    assignment.start_date,
    &assignment.training_days,
  );

  let conflicts = detect_conflicts(
    pool,
    &assignment.athlete_id,
    &schedule,
    Some(&assignment.program_assignment_id),
  )
  .await?;

  if conflicts.has_conflicts && assignment.on_conflict == ConflictPolicy::Abort {
    info!(
      athlete_id = %assignment.athlete_id,
      conflicts = conflicts.conflict_count,
      "Assignment aborted on conflict"
    );
    return Ok(AssignmentOutcome {
      schedule,
      conflicts,
      persisted: None,
    });
  }

  let request = PersistRequest {
    athlete_id: assignment.athlete_id.clone(),
    program_id: assignment.program_id.clone(),
    program_assignment_id: assignment.program_assignment_id.clone(),
    schedule,
  };
  let persisted = persist_schedule(pool, &request).await?;

  Ok(AssignmentOutcome {
    schedule: request.schedule,
    conflicts,
    persisted: Some(persisted),
  })
}

/// Remove a program assignment's sessions, returning how many were deleted
pub async fn unassign_program(
  pool: &SqlitePool,
  program_assignment_id: &str,
) -> Result<u64, ScheduleError> {
  let removed = delete_assignment_sessions(pool, program_assignment_id).await?;
  info!(program_assignment_id, removed, "Removed assignment sessions");
  Ok(removed)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{
    count_sessions, date, mock_program, seed_session, setup_test_db, teardown_test_db, SeedSession,
  };

  fn assignment(on_conflict: ConflictPolicy) -> AssignProgram {
    AssignProgram {
      athlete_id: "ath-1".to_string(),
      program_id: "prog-1".to_string(),
      program_assignment_id: "asg-1".to_string(),
      start_date: date(2026, 10, 19),
      training_days: "1,2,4".parse().unwrap(),
      workouts: mock_program(2, 3),
      on_conflict,
    }
  }

  #[test]
  fn test_preview_uses_training_days() {
    let days: TrainingDays = "mon,thu,sat".parse().unwrap();
    let schedule = preview_schedule(&mock_program(1, 3), date(2026, 10, 21), &days);
    let dates: Vec<NaiveDate> = schedule.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![date(2026, 10, 22), date(2026, 10, 24), date(2026, 10, 26)]);
  }

  #[tokio::test]
  async fn test_assign_without_conflicts_creates_everything() {
    let pool = setup_test_db().await;

    let outcome = assign_program(&pool, &assignment(ConflictPolicy::Proceed)).await.unwrap();

    assert!(!outcome.conflicts.has_conflicts);
    assert_eq!(outcome.schedule.len(), 6);
    assert_eq!(
      outcome.persisted,
      Some(PersistOutcome { created: 6, skipped: 0, total: 6 })
    );
    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_abort_policy_writes_nothing_on_conflict() {
    let pool = setup_test_db().await;
    seed_session(&pool, SeedSession::new("ath-1", date(2026, 10, 20), "Recovery ride")).await;

    let outcome = assign_program(&pool, &assignment(ConflictPolicy::Abort)).await.unwrap();

    assert_eq!(outcome.conflicts.conflict_count, 1);
    assert!(outcome.persisted.is_none());
    assert_eq!(count_sessions(&pool, "ath-1").await, 1);
    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_proceed_policy_skips_occupied_dates() {
    let pool = setup_test_db().await;
    seed_session(&pool, SeedSession::new("ath-1", date(2026, 10, 20), "Recovery ride")).await;

    let outcome = assign_program(&pool, &assignment(ConflictPolicy::Proceed)).await.unwrap();

    assert_eq!(outcome.conflicts.conflict_count, 1);
    assert_eq!(
      outcome.persisted,
      Some(PersistOutcome { created: 5, skipped: 1, total: 6 })
    );
    assert_eq!(count_sessions(&pool, "ath-1").await, 6);
    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_reassigning_same_program_reports_no_conflicts() {
    let pool = setup_test_db().await;
    let request = assignment(ConflictPolicy::Abort);

    assign_program(&pool, &request).await.unwrap();
    let again = assign_program(&pool, &request).await.unwrap();

    assert!(!again.conflicts.has_conflicts);
    assert_eq!(
      again.persisted,
      Some(PersistOutcome { created: 0, skipped: 6, total: 6 })
    );
    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_unassign_then_reassign_recreates_sessions() {
    let pool = setup_test_db().await;
    let request = assignment(ConflictPolicy::Proceed);

    assign_program(&pool, &request).await.unwrap();
    assert_eq!(unassign_program(&pool, "asg-1").await.unwrap(), 6);
    assert_eq!(count_sessions(&pool, "ath-1").await, 0);

    let outcome = assign_program(&pool, &request).await.unwrap();
    assert_eq!(outcome.persisted.map(|p| p.created), Some(6));
    teardown_test_db(pool).await;
  }
}
