//! Schedule Generator
//!
//! Turns a program (ordered weeks of prescribed workout days) into concrete
//! calendar-dated sessions for one athlete.
//!
//! Rules:
//! - Program weeks map onto calendar weeks (Monday to Sunday), in order
//! - Within a week, the lowest day number takes the earliest training day
//! - A mid-week start never schedules anything before the start date
//! - A program week with more workouts than training days spills over into
//!   the next calendar week, and the following program week starts after that
//! - Pure: no I/O, same input always gives the same output

use chrono::{Duration, NaiveDate};

use crate::calendar::{self, monday_offset, DEFAULT_TRAINING_DAYS};
use crate::models::{ScheduledSession, WorkoutInput};

/// Generate dated sessions for `workouts`, starting at `start_date`, on the
/// Sunday-first weekday numbers in `training_days`.
///
/// Empty `workouts` or empty `training_days` yields an empty schedule.
/// Week and day numbers are expected to be >= 1; they are not validated.
pub fn generate(
    workouts: &[WorkoutInput],
    start_date: NaiveDate,
    training_days: &[u32],
) -> Vec<ScheduledSession> {
    if workouts.is_empty() || training_days.is_empty() {
        return Vec::new();
    }

    let mut offsets: Vec<i64> = training_days.iter().map(|d| monday_offset(*d)).collect();
    offsets.sort_unstable();
    offsets.dedup();

    // Stable sort keeps input order for duplicate (week, day) pairs
    let mut sorted: Vec<&WorkoutInput> = workouts.iter().collect();
    sorted.sort_by_key(|w| (w.week_number, w.day_number));

    let mut week_start = calendar::week_start(start_date);
    let mut schedule = Vec::with_capacity(workouts.len());

    for (index, program_week) in sorted
        .chunk_by(|a, b| a.week_number == b.week_number)
        .enumerate()
    {
        let first_week = index == 0;
        let mut pending = program_week.iter().peekable();

        while pending.peek().is_some() {
            let available = offsets
                .iter()
                .map(|offset| week_start + Duration::days(*offset))
                .filter(|date| !first_week || *date >= start_date);

            for date in available {
                let Some(workout) = pending.next() else {
                    break;
                };
                schedule.push(ScheduledSession {
                    date,
                    workout_id: workout.id.clone(),
                    week_number: workout.week_number,
                    day_number: workout.day_number,
                    title: workout.name.clone(),
                });
            }

            if pending.peek().is_some() {
                // Spillover into the next calendar week
                week_start += Duration::days(7);
            }
        }

        week_start += Duration::days(7);
    }

    schedule
}

/// [`generate`] with the Mon/Tue/Thu/Fri default pattern
pub fn generate_default(workouts: &[WorkoutInput], start_date: NaiveDate) -> Vec<ScheduledSession> {
    generate(workouts, start_date, &DEFAULT_TRAINING_DAYS)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
