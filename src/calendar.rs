//! Calendar-day math shared by schedule generation and conflict reporting.
//!
//! Weekdays arrive Sunday-first (0=Sunday ... 6=Saturday), the encoding
//! athletes' training-day patterns are stored in. Everything that orders days
//! within a week goes through [`monday_offset`] so that weeks run Monday to
//! Sunday.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Mon/Tue/Thu/Fri
pub const DEFAULT_TRAINING_DAYS: [u32; 4] = [1, 2, 4, 5];

/// Map a Sunday-first weekday number to its offset from Monday.
pub fn monday_offset(day: u32) -> i64 {
    if day == 0 {
        6
    } else {
        day as i64 - 1
    }
}

/// Monday offset of a concrete calendar day
pub fn monday_offset_of(date: NaiveDate) -> i64 {
    monday_offset(date.weekday().num_days_from_sunday())
}

/// Monday of the calendar week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(monday_offset_of(date))
}

/// Today's calendar day in the machine's local time zone.
///
/// Schedules are built from calendar days, never instants. Callers that
/// default a start date to "today" should take it from here once and pass the
/// resulting date down, so every component agrees on which day it is.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

// ---------------------------------------------------------------------------
/// Training-day pattern: which weekdays an athlete trains on
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct TrainingDays(Vec<u32>);

impl TrainingDays {
    /// Validate a set of Sunday-first weekday numbers.
    /// Duplicates are collapsed; an empty set is rejected.
    pub fn new(days: impl IntoIterator<Item = u32>) -> Result<Self, ScheduleError> {
        let mut days: Vec<u32> = days.into_iter().collect();
        if let Some(bad) = days.iter().find(|d| **d > 6) {
            return Err(ScheduleError::InvalidTrainingDay(format!(
                "{} is outside 0 (Sunday) ..= 6 (Saturday)",
                bad
            )));
        }
        days.sort_unstable();
        days.dedup();
        if days.is_empty() {
            return Err(ScheduleError::InvalidTrainingDay(
                "at least one training day is required".into(),
            ));
        }
        Ok(Self(days))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day.num_days_from_sunday())
    }
}

impl Default for TrainingDays {
    fn default() -> Self {
        Self(DEFAULT_TRAINING_DAYS.to_vec())
    }
}

impl TryFrom<Vec<u32>> for TrainingDays {
    type Error = ScheduleError;

    fn try_from(days: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<TrainingDays> for Vec<u32> {
    fn from(days: TrainingDays) -> Self {
        days.0
    }
}

/// Accepts `"1,2,4,5"` or weekday names such as `"mon,tue,thu,fri"`.
impl FromStr for TrainingDays {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let days = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| match part.parse::<u32>() {
                Ok(n) => Ok(n),
                Err(_) => part
                    .parse::<Weekday>()
                    .map(|wd| wd.num_days_from_sunday())
                    .map_err(|_| ScheduleError::InvalidTrainingDay(part.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(days)
    }
}

impl fmt::Display for TrainingDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}
