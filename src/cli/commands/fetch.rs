use crate::config::Config;
use crate::core::context::AppContext;
use crate::core::fetch::{CycleOutcome, fetch_cycle};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

/// Handle the `fetch` command: one cycle, then report what was stored.
pub fn handle(cfg: Config) -> AppResult<()> {
    cfg.validate()?;
    let mut ctx = AppContext::open(cfg)?;

    match fetch_cycle(&mut ctx) {
        CycleOutcome::Stored { attempts, summary } => {
            info(format!(
                "{} prices stored ({} new stations, {} new status rows) after {} attempt(s)",
                summary.prices, summary.stations, summary.statuses, attempts
            ));
            Ok(())
        }
        CycleOutcome::Exhausted { attempts } => Err(AppError::FetchExhausted(attempts)),
        CycleOutcome::Rejected { message } => Err(AppError::Other(format!(
            "API reported an error: {message}"
        ))),
        CycleOutcome::Malformed { reason } | CycleOutcome::PersistFailed { reason } => {
            Err(AppError::Other(reason))
        }
    }
}
