use chrono::{DateTime, Utc};

use crate::filter::RowView;
use crate::output::truncate;
use crate::progress::Summary;

/// Plain-text snapshot of the currently visible table region, with the
/// progress summary as its header. Pure formatter over resolved rows.
pub fn render(rows: &[RowView], summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({}%)\n", summary.label, summary.percentage));
    out.push_str(summary.tier.message());
    out.push_str("\n\n");

    out.push_str(&format!(
        "{:28} {:14} {:12} {:9} {:14} NOTES\n",
        "TASK", "CATEGORY", "WINDOW", "STATUS", "TRAINEE"
    ));
    out.push_str(&"-".repeat(86));
    out.push('\n');

    for row in rows {
        let status = row
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let trainee = if row.trainee.is_empty() { "-" } else { &row.trainee };
        out.push_str(&format!(
            "{:28} {:14} {:12} {:9} {:14} {}\n",
            truncate(&row.task_title, 28),
            truncate(&row.category, 14),
            truncate(&row.target_window, 12),
            status,
            truncate(trainee, 14),
            row.notes
        ));
    }

    if rows.is_empty() {
        out.push_str("no tasks match the current filters\n");
    }

    out
}

pub fn default_filename(now: DateTime<Utc>) -> String {
    format!("induct-{}.txt", now.format("%Y-%m-%d"))
}
