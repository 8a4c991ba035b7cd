//! Scheduled jobs.
//!
//! The host scheduler owns timing; this module declares each job's name and
//! schedule and exposes the function the scheduler calls when it fires.

pub mod daily;
pub mod schedule;

pub use daily::{DAILY_JOB_NAME, JobConfig, run_daily_job};
pub use schedule::{DAILY_JOB_SCHEDULE, Schedule};
