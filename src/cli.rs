//! Command-line surface: every subcommand prints JSON to stdout.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use crate::calendar::{local_today, TrainingDays};
use crate::commands::{self, AssignProgram, ConflictPolicy};
use crate::config::SchedulerConfig;
use crate::conflicts::detect_conflicts;
use crate::db::{initialize_db, DbPool};
use crate::sessions::load_sessions;

#[derive(Parser)]
#[command(name = "trainer-schedule")]
#[command(about = "Turn training programs into dated athlete sessions", long_about = None)]
pub struct Cli {
  /// Increase log verbosity (-v debug, -vv trace)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,

  /// Database URL (overrides DATABASE_URL)
  #[arg(long, global = true)]
  pub database_url: Option<String>,

  #[command(subcommand)]
  pub command: Commands,
}

/// Program file, start date and training days shared by schedule commands
#[derive(clap::Args)]
pub struct ScheduleArgs {
  /// JSON array of workouts: {"id","weekNumber","dayNumber","name"}
  #[arg(long)]
  workouts: PathBuf,
  /// First calendar day sessions may land on (defaults to today)
  #[arg(long)]
  start: Option<NaiveDate>,
  /// Training days, e.g. "1,2,4,5" or "mon,tue,thu,fri" (defaults to config)
  #[arg(long)]
  days: Option<TrainingDays>,
}

#[derive(Subcommand)]
pub enum Commands {
  /// Create or upgrade the database schema
  InitDb,
  /// Print the generated schedule without touching the database
  Preview {
    #[command(flatten)]
    schedule: ScheduleArgs,
  },
  /// Report existing sessions a new schedule would collide with
  Conflicts {
    #[arg(long)]
    athlete: String,
    #[command(flatten)]
    schedule: ScheduleArgs,
    /// Ignore sessions owned by this assignment
    #[arg(long)]
    exclude_assignment: Option<String>,
  },
  /// Assign a program to an athlete and create its sessions
  Assign {
    #[arg(long)]
    athlete: String,
    #[arg(long)]
    program: String,
    #[arg(long)]
    assignment: String,
    #[command(flatten)]
    schedule: ScheduleArgs,
    /// Write nothing if any date is already taken
    #[arg(long)]
    abort_on_conflict: bool,
  },
  /// Delete the sessions created for an assignment
  Unassign {
    #[arg(long)]
    assignment: String,
  },
  /// List an athlete's sessions
  Sessions {
    #[arg(long)]
    athlete: String,
    #[arg(long)]
    from: Option<NaiveDate>,
    #[arg(long)]
    to: Option<NaiveDate>,
  },
}

pub fn init_tracing(verbose: u8) {
  let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    tracing_subscriber::EnvFilter::new(match verbose {
      0 => "info,sqlx=warn",
      1 => "debug,sqlx=warn",
      _ => "trace",
    })
  });

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(verbose >= 2)
    .with_writer(std::io::stderr)
    .init();

  debug!("trainer-schedule started with verbosity level: {}", verbose);
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

struct ResolvedSchedule {
  workouts: Vec<crate::models::WorkoutInput>,
  start: NaiveDate,
  days: TrainingDays,
}

fn resolve(args: ScheduleArgs, config: &SchedulerConfig) -> anyhow::Result<ResolvedSchedule> {
  let workouts = commands::load_workouts(&args.workouts)
    .with_context(|| format!("failed to load workouts from {}", args.workouts.display()))?;
  Ok(ResolvedSchedule {
    workouts,
    start: args.start.unwrap_or_else(local_today),
    days: args.days.unwrap_or_else(|| config.default_training_days.clone()),
  })
}

async fn connect(config: &SchedulerConfig) -> anyhow::Result<DbPool> {
  initialize_db(config)
    .await
    .with_context(|| format!("failed to open database {}", config.database_url))
}

pub async fn execute(cli: Cli, mut config: SchedulerConfig) -> anyhow::Result<()> {
  if let Some(url) = cli.database_url {
    config.database_url = url;
  }

  match cli.command {
    Commands::InitDb => {
      let pool = connect(&config).await?;
      pool.close().await;
      print_json(&serde_json::json!({ "databaseUrl": config.database_url, "ready": true }))?;
    }
    Commands::Preview { schedule } => {
      let resolved = resolve(schedule, &config)?;
      let sessions = commands::preview_schedule(&resolved.workouts, resolved.start, &resolved.days);
      print_json(&sessions)?;
    }
    Commands::Conflicts {
      athlete,
      schedule,
      exclude_assignment,
    } => {
      let resolved = resolve(schedule, &config)?;
      let sessions = commands::preview_schedule(&resolved.workouts, resolved.start, &resolved.days);
      let pool = connect(&config).await?;
      let report = detect_conflicts(&pool, &athlete, &sessions, exclude_assignment.as_deref()).await?;
      print_json(&report)?;
    }
    Commands::Assign {
      athlete,
      program,
      assignment,
      schedule,
      abort_on_conflict,
    } => {
      let resolved = resolve(schedule, &config)?;
      let pool = connect(&config).await?;
      let request = AssignProgram {
        athlete_id: athlete,
        program_id: program,
        program_assignment_id: assignment,
        start_date: resolved.start,
        training_days: resolved.days,
        workouts: resolved.workouts,
        on_conflict: if abort_on_conflict {
          ConflictPolicy::Abort
        } else {
          ConflictPolicy::Proceed
        },
      };
      let outcome = commands::assign_program(&pool, &request).await?;
      print_json(&outcome)?;
    }
    Commands::Unassign { assignment } => {
      let pool = connect(&config).await?;
      let removed = commands::unassign_program(&pool, &assignment).await?;
      print_json(&serde_json::json!({ "programAssignmentId": assignment, "removed": removed }))?;
    }
    Commands::Sessions { athlete, from, to } => {
      let pool = connect(&config).await?;
      let sessions = load_sessions(&pool, &athlete, from, to).await?;
      print_json(&sessions)?;
    }
  }

  Ok(())
}
