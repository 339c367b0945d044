use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::SessionStatus;

/// An existing session that sits on a date a new schedule wants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictingSession {
  pub date: NaiveDate,
  pub existing_title: String,
  pub existing_program_id: Option<String>,
  pub existing_program_assignment_id: Option<String>,
  pub existing_status: SessionStatus,
  pub new_title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
  pub has_conflicts: bool,
  pub conflicts: Vec<ConflictingSession>,
  pub conflict_count: usize,
}

impl ConflictReport {
  pub fn from_conflicts(conflicts: Vec<ConflictingSession>) -> Self {
    Self {
      has_conflicts: !conflicts.is_empty(),
      conflict_count: conflicts.len(),
      conflicts,
    }
  }
}
