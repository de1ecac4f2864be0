use chrono::{DateTime, Utc};

use crate::filter::RowView;

const HEADERS: [&str; 8] = [
    "Task",
    "Category",
    "Target Window",
    "Status",
    "Notes",
    "Trainee",
    "Updated By",
    "Updated",
];

/// Render resolved rows as delimited text, one line per visible assignment.
/// Pure formatter; consumes rows the filter engine already denormalized.
pub fn to_csv(rows: &[RowView]) -> String {
    let mut out = String::new();
    out.push_str(&HEADERS.map(escape).join(","));
    out.push('\n');

    for row in rows {
        let status = row.status.map(|s| s.to_string()).unwrap_or_default();
        let updated = row.updated_at.map(format_date).unwrap_or_default();
        let fields = [
            row.task_title.as_str(),
            row.category.as_str(),
            row.target_window.as_str(),
            status.as_str(),
            row.notes.as_str(),
            row.trainee.as_str(),
            row.updated_by.as_str(),
            updated.as_str(),
        ];
        out.push_str(&fields.map(escape).join(","));
        out.push('\n');
    }

    out
}

/// Localized short date (day.month.year) for the update column.
fn format_date(at: DateTime<Utc>) -> String {
    at.format("%-d.%-m.%Y").to_string()
}

pub fn default_filename(now: DateTime<Utc>) -> String {
    format!("induct-{}.csv", now.format("%Y-%m-%d"))
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use chrono::TimeZone;

    fn row(title: &str, notes: &str) -> RowView {
        RowView {
            task_id: "t-1".into(),
            trainee_id: "u-1".into(),
            task_title: title.into(),
            category: "skills".into(),
            target_window: "week 1".into(),
            status: Some(Status::Done),
            notes: notes.into(),
            trainee: "Dana".into(),
            updated_by: "Noa".into(),
            updated_at: Some(Utc.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).single().unwrap()),
        }
    }

    #[test]
    fn renders_header_and_one_line_per_row() {
        let csv = to_csv(&[row("Start IV line", "ok"), row("Vitals check", "")]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Task,Category,Target Window,Status,Notes,Trainee,Updated By,Updated"
        );
        assert_eq!(lines[1], "Start IV line,skills,week 1,done,ok,Dana,Noa,7.3.2026");
    }

    #[test]
    fn quotes_embedded_delimiters_and_quotes() {
        let csv = to_csv(&[row("Meds, round two", "she said \"fine\"")]);
        assert!(csv.contains("\"Meds, round two\""));
        assert!(csv.contains("\"she said \"\"fine\"\"\""));
    }

    #[test]
    fn quotes_embedded_newlines() {
        let csv = to_csv(&[row("Task", "line one\nline two")]);
        assert!(csv.contains("\"line one\nline two\""));
    }

    #[test]
    fn placeholder_rows_render_empty_cells() {
        let mut r = row("Unassigned task", "");
        r.status = None;
        r.updated_at = None;
        r.trainee = String::new();
        r.updated_by = String::new();

        let csv = to_csv(&[r]);
        assert!(csv.lines().nth(1).unwrap().ends_with("week 1,,,,,"));
    }

    #[test]
    fn filename_is_date_stamped() {
        let now = Utc.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).single().unwrap();
        assert_eq!(default_filename(now), "induct-2026-03-07.csv");
    }
}
