use std::env;

use crate::calendar::TrainingDays;
use crate::error::ScheduleError;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DEFAULT_DATABASE_URL: &str = "sqlite://trainer-schedule.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
  pub database_url: String,
  pub max_connections: u32,
  pub default_training_days: TrainingDays,
}

impl Default for SchedulerConfig {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      max_connections: DEFAULT_MAX_CONNECTIONS,
      default_training_days: TrainingDays::default(),
    }
  }
}

impl SchedulerConfig {
  /// Read configuration from the environment (call `dotenvy::dotenv()` first
  /// to pick up a `.env` file). Unset variables fall back to defaults; set
  /// but malformed ones are errors.
  pub fn from_env() -> Result<Self, ScheduleError> {
    let mut config = Self::default();

    if let Ok(url) = env::var("DATABASE_URL") {
      if url.trim().is_empty() {
        return Err(ScheduleError::MissingConfig("DATABASE_URL".into()));
      }
      config.database_url = url;
    }

    if let Ok(raw) = env::var("DB_MAX_CONNECTIONS") {
      config.max_connections = match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => {
          return Err(ScheduleError::InvalidConfig(format!(
            "DB_MAX_CONNECTIONS must be a positive integer, got {:?}",
            raw
          )))
        }
      };
    }

    if let Ok(raw) = env::var("DEFAULT_TRAINING_DAYS") {
      config.default_training_days = raw.parse()?;
    }

    Ok(config)
  }
}
