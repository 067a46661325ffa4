use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::strip_ansi;
use ansi_term::Colour;

const OP_TARGET_MAX: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "punch" | "add" | "approve" => Colour::Green,
        "del" | "reject" | "employee_deactivate" => Colour::Red,
        "edit" => Colour::Yellow,
        "request" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        other if other.starts_with("employee_") || other.starts_with("holiday_") => Colour::Blue,
        _ => Colour::White,
    }
}

/// Keep at most `max` visible characters, ending with "..." when cut.
fn truncate_visible(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

pub struct LogLogic;

impl LogLogic {
    /// Rows in id order, optionally restricted to one operation and to the
    /// last `limit` rows.
    pub fn load(
        pool: &DbPool,
        operation: Option<&str>,
        limit: Option<usize>,
    ) -> AppResult<Vec<LogRow>> {
        let mut out = load_log(&pool.conn, operation)?;

        if let Some(n) = limit
            && out.len() > n
        {
            out.drain(..out.len() - n);
        }
        Ok(out)
    }

    pub fn print_log(
        pool: &DbPool,
        operation: Option<&str>,
        limit: Option<usize>,
    ) -> AppResult<()> {
        let rows = Self::load(pool, operation, limit)?;

        if rows.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_targets: Vec<String> = rows
            .iter()
            .map(|r| {
                let plain = if r.target.is_empty() {
                    r.operation.clone()
                } else {
                    format!("{} ({})", r.operation, r.target)
                };
                truncate_visible(&plain, OP_TARGET_MAX)
            })
            .collect();

        let op_w = op_targets.iter().map(|s| s.chars().count()).max().unwrap_or(10);
        let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (row, op_target) in rows.iter().zip(op_targets) {
            let color = color_for_operation(&row.operation);

            // only the operation word is colored
            let colored = match op_target.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(op_target.as_str()).to_string(),
            };
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                row.id,
                row.date,
                colored,
                padding,
                row.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
