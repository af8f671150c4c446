//! Recurring fetch job on top of `tokio-cron-scheduler`.
//!
//! A fetch cycle is blocking work (rusqlite, blocking reqwest), so each tick
//! hands it to the blocking pool. The context lives behind a mutex that ticks
//! only ever `try_lock`: a tick that finds the previous cycle still running is
//! skipped, so two cycles never overlap.

use crate::core::context::AppContext;
use crate::core::fetch::{CycleOutcome, fetch_cycle};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, warning};
use std::sync::{Arc, Mutex, TryLockError};
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};

/// Context shared between the scheduler ticks.
pub type SharedContext = Arc<Mutex<AppContext>>;

pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Register the fetch job and start ticking. The first cycle runs one
    /// interval after start.
    pub async fn start(&self, ctx: SharedContext) -> AppResult<JobScheduler> {
        let sched = JobScheduler::new().await?;

        sched
            .add(Job::new_repeated_async(self.interval, move |_uuid, _l| {
                let ctx = ctx.clone();
                Box::pin(async move {
                    let res = tokio::task::spawn_blocking(move || run_scheduled_cycle(&ctx)).await;
                    if let Err(e) = res {
                        error(format!("Fetch job aborted: {e}"));
                    }
                })
            })?)
            .await?;

        sched.start().await?;
        Ok(sched)
    }

    /// Poll until interrupted with Ctrl-C.
    pub fn run(&self, ctx: AppContext) -> AppResult<()> {
        let rt = tokio::runtime::Runtime::new()?;
        let shared: SharedContext = Arc::new(Mutex::new(ctx));

        rt.block_on(async {
            let mut sched = self.start(shared.clone()).await?;

            tokio::signal::ctrl_c().await?;
            info("Interrupted, stopping the scheduler");
            sched.shutdown().await?;
            Ok::<_, AppError>(())
        })
    }
}

/// Run one cycle unless the previous one still holds the context.
/// Returns `None` when the tick was skipped.
pub fn run_scheduled_cycle(ctx: &Mutex<AppContext>) -> Option<CycleOutcome> {
    let mut guard = match ctx.try_lock() {
        Ok(guard) => guard,
        Err(TryLockError::WouldBlock) => {
            warning("Previous fetch is still running, skipping this run");
            return None;
        }
        // A cycle that panicked rolled its transaction back; the context is still usable.
        Err(TryLockError::Poisoned(p)) => p.into_inner(),
    };

    Some(fetch_cycle(&mut guard))
}
