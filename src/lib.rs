pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod conflicts;
pub mod db;
pub mod error;
pub mod models;
pub mod persist;
pub mod schedule;
pub mod sessions;

#[cfg(test)]
mod test_utils;

use anyhow::Context;
use clap::Parser;

pub use calendar::TrainingDays;
pub use conflicts::detect_conflicts;
pub use error::ScheduleError;
pub use persist::{persist_schedule, PersistOutcome, PersistRequest};
pub use schedule::generate;

pub fn run() -> anyhow::Result<()> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let cli = cli::Cli::parse();
  cli::init_tracing(cli.verbose);

  let config = config::SchedulerConfig::from_env().context("invalid configuration")?;

  let runtime = tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .build()
    .context("failed to start async runtime")?;

  runtime.block_on(cli::execute(cli, config))
}
