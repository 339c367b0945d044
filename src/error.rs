use serde::Serialize;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("Invalid training day: {0}")]
  InvalidTrainingDay(String),

  #[error("Unknown session status: {0}")]
  UnknownStatus(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration failed: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Invalid JSON: {0}")]
  Json(#[from] serde_json::Error),
}

impl Serialize for ScheduleError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}
