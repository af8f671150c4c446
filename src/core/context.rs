//! Everything a fetch cycle needs, built once at startup and passed by
//! reference. There is no process-wide state.

use crate::api::transport::{ReqwestTransport, Transport};
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub struct AppContext {
    pub cfg: Config,
    pub pool: DbPool,
    pub transport: Box<dyn Transport>,
    pub clock: Box<dyn Clock>,
}

impl AppContext {
    /// Open the configured database (creating the schema) and build the
    /// real HTTP transport and clock.
    pub fn open(cfg: Config) -> AppResult<Self> {
        let pool = DbPool::new(&cfg.database_path)?;
        init_db(&pool.conn)?;

        let transport = ReqwestTransport::new(cfg.request_timeout())?;

        Ok(Self {
            cfg,
            pool,
            transport: Box::new(transport),
            clock: Box::new(SystemClock),
        })
    }

    /// Assemble a context from already-built parts.
    pub fn with_parts(
        cfg: Config,
        pool: DbPool,
        transport: Box<dyn Transport>,
        clock: Box<dyn Clock>,
    ) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self {
            cfg,
            pool,
            transport,
            clock,
        })
    }
}
