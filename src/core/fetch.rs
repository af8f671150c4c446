//! One fetch cycle: request with fixed-delay retries, decode, normalize and
//! persist in a single transaction.

use crate::core::context::AppContext;
use crate::db::log::ttlog_quiet;
use crate::db::queries::{CycleSummary, persist_cycle};
use crate::errors::{AppError, AppResult};
use crate::models::api::ListResponse;
use crate::models::station::normalize;
use crate::ui::messages::{error, success, warning};

/// How a cycle ended. The scheduler ignores it; `fetch` and tests read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Response stored; counts are rows actually written.
    Stored { attempts: u32, summary: CycleSummary },
    /// Every attempt failed, nothing written.
    Exhausted { attempts: u32 },
    /// API answered `ok: false` and processing of such answers is disabled.
    Rejected { message: String },
    /// Body could not be decoded.
    Malformed { reason: String },
    /// Storage failed, the cycle was rolled back.
    PersistFailed { reason: String },
}

/// Issue the request until a success status is seen or `tries` attempts are
/// used up. Returns the body and the number of attempts it took.
pub fn fetch_with_retry(ctx: &AppContext) -> AppResult<(String, u32)> {
    let tries = ctx.cfg.tries;
    let params = ctx.cfg.query_params();

    for attempt in 1..=tries {
        match ctx.transport.get(&ctx.cfg.url, &params) {
            Ok(resp) if resp.is_success() => return Ok((resp.body, attempt)),
            Ok(resp) => warning(format!("Request failed with HTTP {}", resp.status)),
            Err(e) => warning(format!("Request failed: {e}")),
        }

        if attempt < tries {
            warning(format!("Retrying {attempt}/{tries}"));
            ctx.clock.sleep(ctx.cfg.retry_delay());
        }
    }

    Err(AppError::FetchExhausted(tries))
}

/// Run one complete fetch cycle. Never fails: every problem is logged and
/// reported through the returned outcome.
pub fn fetch_cycle(ctx: &mut AppContext) -> CycleOutcome {
    let (body, attempts) = match fetch_with_retry(ctx) {
        Ok(r) => r,
        Err(e) => {
            error(&e);
            ttlog_quiet(&ctx.pool.conn, "fetch", "exhausted", &e.to_string());
            return CycleOutcome::Exhausted {
                attempts: ctx.cfg.tries,
            };
        }
    };

    let data = match ListResponse::from_json(&body) {
        Ok(d) => d,
        Err(e) => {
            let e = AppError::from(e);
            error(&e);
            ttlog_quiet(&ctx.pool.conn, "fetch", "malformed", &e.to_string());
            return CycleOutcome::Malformed {
                reason: e.to_string(),
            };
        }
    };

    if !data.ok {
        let message = data
            .message
            .clone()
            .unwrap_or_else(|| format!("API status '{}'", data.status));
        warning(format!("API reported an error: {message}"));

        if !ctx.cfg.process_on_api_error {
            ttlog_quiet(&ctx.pool.conn, "fetch", "rejected", &message);
            return CycleOutcome::Rejected { message };
        }
    }

    // One timestamp for the whole batch.
    let timestamp = ctx.clock.unix_now();
    let records = normalize(data.stations.as_deref().unwrap_or_default(), timestamp);

    match persist_cycle(&mut ctx.pool, &records) {
        Ok(summary) => {
            success("Successfully fetched the current prices");
            ttlog_quiet(
                &ctx.pool.conn,
                "fetch",
                &timestamp.to_string(),
                &format!(
                    "{} prices, {} new stations, {} new status rows",
                    summary.prices, summary.stations, summary.statuses
                ),
            );
            CycleOutcome::Stored { attempts, summary }
        }
        Err(e) => {
            error(format!("Failed to store prices: {e}"));
            ttlog_quiet(&ctx.pool.conn, "fetch", "persist_failed", &e.to_string());
            CycleOutcome::PersistFailed {
                reason: e.to_string(),
            }
        }
    }
}
