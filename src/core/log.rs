use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

static ANSI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ANSI pattern is valid")
});

const MAX_OP_WIDTH: usize = 40;

fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

/// Colour for an operation, keyed on the operation and its target.
fn color_for_operation(op: &str, target: &str) -> Colour {
    match (op, target) {
        ("fetch", "exhausted" | "persist_failed" | "malformed") => Colour::Red,
        ("fetch", "rejected") => Colour::Yellow,
        ("fetch", _) => Colour::Green,
        ("backup", _) => Colour::Blue,
        ("init", _) => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// One row of the internal `log` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    fn op_target(&self) -> String {
        if self.target.is_empty() {
            self.operation.clone()
        } else {
            format!("{} ({})", self.operation, self.target)
        }
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn load(pool: &mut DbPool) -> AppResult<Vec<LogEntry>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }
        Ok(entries)
    }

    /// Render one entry; the operation word is coloured, padding is computed
    /// on the visible width.
    pub fn format_entry(entry: &LogEntry, id_w: usize, date_w: usize, op_w: usize) -> String {
        let color = color_for_operation(&entry.operation, &entry.target);

        let visible = entry.op_target();
        let visible = if visible.chars().count() > MAX_OP_WIDTH {
            let mut s: String = visible.chars().take(MAX_OP_WIDTH - 3).collect();
            s.push_str("...");
            s
        } else {
            visible
        };

        let colored = match visible.split_once(' ') {
            Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
            None => color.paint(visible.as_str()).to_string(),
        };

        let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

        format!(
            "{:>id_w$}: {:<date_w$} | {}{} => {}",
            entry.id, entry.date, colored, padding, entry.message
        )
    }

    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = Self::load(pool)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| e.op_target().chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);

        println!("📜 Internal log:\n");
        for entry in &entries {
            println!("{}", Self::format_entry(entry, id_w, date_w, op_w));
        }

        Ok(())
    }
}
