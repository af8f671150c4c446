use crate::db::pool::DbPool;
use crate::db::queries::{count_rows, price_time_range};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::{Local, TimeZone};
use std::fs;

fn fmt_epoch(ts: i64) -> String {
    Local
        .timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ts.to_string())
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let (stations, statuses, prices) = count_rows(&pool.conn)?;
    println!("{}• Stations:{} {}{}{}", CYAN, RESET, GREEN, stations, RESET);
    println!("{}• Status rows:{} {}{}{}", CYAN, RESET, GREEN, statuses, RESET);
    println!("{}• Prices:{} {}{}{}", CYAN, RESET, GREEN, prices, RESET);

    //
    // 3) TIME RANGE
    //
    let range = price_time_range(&pool.conn)?;
    let (fmt_first, fmt_last) = match range {
        Some((first, last)) => (fmt_epoch(first), fmt_epoch(last)),
        None => (format!("{GREY}--{RESET}"), format!("{GREY}--{RESET}")),
    };

    println!("{}• Price range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) SAMPLES PER CYCLE
    //
    let cycles: i64 =
        pool.conn
            .query_row("SELECT COUNT(DISTINCT timestamp) FROM prices", [], |row| {
                row.get(0)
            })?;
    if cycles > 0 {
        let avg = prices as f64 / cycles as f64;
        println!(
            "{}• Fetch cycles:{} {} ({:.1} prices/cycle)",
            CYAN, RESET, cycles, avg
        );
    }

    println!();
    Ok(())
}
