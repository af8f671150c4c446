use crate::config::Config;
use crate::core::context::AppContext;
use crate::core::scheduler::Scheduler;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Handle the `run` command: validate, open the store and poll until interrupted.
pub fn handle(cfg: Config) -> AppResult<()> {
    cfg.validate()?;

    let scheduler = Scheduler::new(cfg.interval());
    let ctx = AppContext::open(cfg)?;

    info(format!(
        "Polling {} every {}s (database: {})",
        ctx.cfg.url, ctx.cfg.interval, ctx.cfg.database_path
    ));

    scheduler.run(ctx)
}
