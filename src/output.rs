use clap::ValueEnum;
use colored::{ColoredString, Colorize};

use crate::error::Result;
use crate::filter::RowView;
use crate::model::{Status, User};
use crate::progress::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

fn paint_status(status: Status) -> ColoredString {
    match status {
        Status::Done => status.to_string().green(),
        Status::Observed => status.to_string().yellow(),
        Status::NotDone => status.to_string().dimmed(),
    }
}

pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let truncated: String = text.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn dash_if_empty(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}

/// Leading uuid chars, enough to address a row with the prefix resolver.
fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

pub fn print_rows(rows: &[RowView], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(rows)?),
        Format::Pretty => {
            if rows.is_empty() {
                println!("no tasks match the current filters");
            }
            for row in rows {
                let status = match row.status {
                    Some(status) => paint_status(status),
                    None => "unassigned".dimmed(),
                };
                println!("[{}] {} ({})", short_id(&row.task_id), row.task_title, status);
                println!("  category: {} | window: {}", row.category, row.target_window);
                println!("  trainee: {}", dash_if_empty(&row.trainee));
                if !row.notes.is_empty() {
                    println!("  notes: {}", row.notes);
                }
                println!();
            }
        }
        Format::Minimal => {
            println!(
                "{:8} {:28} {:14} {:12} {:9} {:14} NOTES",
                "ID", "TASK", "CATEGORY", "WINDOW", "STATUS", "TRAINEE"
            );
            println!("{}", "-".repeat(95));
            for row in rows {
                let status = row
                    .status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:8} {:28} {:14} {:12} {:9} {:14} {}",
                    short_id(&row.task_id),
                    truncate(&row.task_title, 28),
                    truncate(&row.category, 14),
                    truncate(&row.target_window, 12),
                    status,
                    truncate(dash_if_empty(&row.trainee), 14),
                    row.notes
                );
            }
        }
    }
    Ok(())
}

pub fn print_summary(summary: &Summary, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(summary)?),
        Format::Pretty => {
            let percentage = format!("{}%", summary.percentage).color(summary.tier.color());
            println!("{} {}", percentage.bold(), summary.tier.message());
            println!("{}", summary.label);
        }
        Format::Minimal => {
            println!("{}/{} {}%", summary.completed, summary.total, summary.percentage);
        }
    }
    Ok(())
}

pub fn print_users(users: &[User], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(users)?),
        Format::Pretty | Format::Minimal => {
            for user in users {
                println!("{:38} {:12} {}", user.id, user.role.to_string(), user.name);
            }
        }
    }
    Ok(())
}
