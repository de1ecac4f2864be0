use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::ValueEnum;

use crate::error::Result;
use crate::export::{csv, sheet};
use crate::model::FilterPatch;
use crate::output::Format;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    /// Delimited text, one line per visible assignment.
    Csv,
    /// Plain-text snapshot of the visible table with the summary header.
    Sheet,
}

pub fn run(
    root: &Path,
    kind: Kind,
    out: Option<PathBuf>,
    search: Option<String>,
    category: Option<String>,
    window: Option<String>,
    completed: bool,
    as_user: Option<String>,
    format: Format,
) -> Result<()> {
    let mut session = super::open_session(root, as_user.as_deref())?;

    session.set_filters(FilterPatch {
        search,
        category: super::scope_arg(category),
        target_window: super::scope_arg(window),
        show_only_completed: completed.then_some(true),
    });

    let rows = session.resolved_rows();
    let now = Utc::now();
    let (content, path) = match kind {
        Kind::Csv => (
            csv::to_csv(&rows),
            out.unwrap_or_else(|| csv::default_filename(now).into()),
        ),
        Kind::Sheet => (
            sheet::render(&rows, &session.summary()),
            out.unwrap_or_else(|| sheet::default_filename(now).into()),
        ),
    };
    fs::write(&path, content)?;

    match format {
        Format::Json => println!(
            "{}",
            serde_json::json!({ "exported": path, "rows": rows.len() })
        ),
        _ => println!("exported {} rows to {}", rows.len(), path.display()),
    }
    Ok(())
}
