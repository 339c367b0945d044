pub mod assignment;

use std::path::Path;

use crate::error::ScheduleError;
use crate::models::WorkoutInput;

pub use assignment::{
  assign_program, preview_schedule, unassign_program, AssignProgram, AssignmentOutcome,
  ConflictPolicy,
};

/// Read a program's workouts from a JSON array of
/// `{"id", "weekNumber", "dayNumber", "name"}` objects
pub fn load_workouts(path: &Path) -> Result<Vec<WorkoutInput>, ScheduleError> {
  let raw = std::fs::read_to_string(path)?;
  let workouts = serde_json::from_str(&raw)?;
  Ok(workouts)
}
