use serde::Serialize;
use tracing::{error, info};

use pricebook_events::WorkflowError;
use pricebook_pricing::CreatePriceSet;

use super::schedule::Schedule;
use crate::context::AppContext;
use crate::workflows::{CreatePriceSetResult, CreatePriceSetStep, create_price_set_workflow};

pub const DAILY_JOB_NAME: &str = "run-once-a-day";

/// What the host scheduler registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobConfig {
    pub name: &'static str,
    pub schedule: String,
}

impl JobConfig {
    pub fn daily(schedule: &Schedule) -> Self {
        Self {
            name: DAILY_JOB_NAME,
            schedule: schedule.to_string(),
        }
    }

    /// Registration for the schedule configured on `ctx`.
    pub fn for_context(ctx: &AppContext) -> Self {
        Self::daily(&ctx.config().daily_job_schedule)
    }
}

/// Creates the default price set. Called by the scheduler on each firing.
pub fn run_daily_job(ctx: &AppContext) -> Result<CreatePriceSetResult, WorkflowError> {
    info!(job = DAILY_JOB_NAME, "job started");
    let step = CreatePriceSetStep::new(ctx.price_sets().clone());
    match create_price_set_workflow(&step, CreatePriceSet::daily_default()) {
        Ok(result) => {
            info!(job = DAILY_JOB_NAME, price_set_id = %result.price_set.id, "job finished");
            Ok(result)
        }
        Err(e) => {
            error!(job = DAILY_JOB_NAME, error = %e, "job failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::jobs::DAILY_JOB_SCHEDULE;
    use crate::store::ModuleStore;

    #[test]
    fn default_registration() {
        let ctx = AppContext::in_memory(Config::default());
        let job = JobConfig::for_context(&ctx);
        assert_eq!(job.name, "run-once-a-day");
        assert_eq!(job.schedule, DAILY_JOB_SCHEDULE);
    }

    #[test]
    fn each_run_adds_a_price_set() {
        let ctx = AppContext::in_memory(Config::default());
        let first = run_daily_job(&ctx).unwrap();
        let second = run_daily_job(&ctx).unwrap();

        assert_ne!(first.price_set.id, second.price_set.id);
        assert_eq!(ctx.price_sets().list().unwrap().len(), 2);
    }
}
