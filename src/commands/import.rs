use std::fs;
use std::path::Path;

use uuid::Uuid;

use crate::error::{InductError, Result};
use crate::model::{Role, Task, User};
use crate::output::Format;
use crate::store::blobs::BlobStore;

/// Convert headered CSV files into the catalog JSON the loader reads.
///
/// Tasks: `title,category,target_window[,note]`. Users: `name,role`. Ids are
/// minted fresh on every import, so importing replaces the catalog rather
/// than merging into it.
pub fn run(
    root: &Path,
    tasks_csv: Option<&Path>,
    users_csv: Option<&Path>,
    format: Format,
) -> Result<()> {
    let store = BlobStore::open(root)?;
    let catalog_dir = store.root().join("catalog");

    let mut imported_tasks = 0;
    let mut imported_users = 0;

    if let Some(path) = tasks_csv {
        let tasks = tasks_from_csv(&fs::read_to_string(path)?)?;
        imported_tasks = tasks.len();
        fs::write(
            catalog_dir.join("tasks.json"),
            serde_json::to_string_pretty(&tasks)?,
        )?;
        if format != Format::Json {
            println!("imported {imported_tasks} tasks into catalog/tasks.json");
            for (i, task) in tasks.iter().take(3).enumerate() {
                println!("  {}. {} ({})", i + 1, task.title, task.target_window);
            }
        }
    }

    if let Some(path) = users_csv {
        let users = users_from_csv(&fs::read_to_string(path)?)?;
        imported_users = users.len();
        fs::write(
            catalog_dir.join("users.json"),
            serde_json::to_string_pretty(&users)?,
        )?;
        if format != Format::Json {
            println!("imported {imported_users} users into catalog/users.json");
        }
    }

    if tasks_csv.is_none() && users_csv.is_none() {
        eprintln!("nothing to import (pass --tasks and/or --users)");
    }

    if format == Format::Json {
        println!(
            "{}",
            serde_json::json!({ "tasks": imported_tasks, "users": imported_users })
        );
    }
    Ok(())
}

fn tasks_from_csv(content: &str) -> Result<Vec<Task>> {
    let records = parse_csv(content);
    let header = records.first().ok_or(InductError::MissingColumn("title"))?;
    let title = column(header, &["title"]).ok_or(InductError::MissingColumn("title"))?;
    let category = column(header, &["category"]).ok_or(InductError::MissingColumn("category"))?;
    let window = column(header, &["target_window", "targetwindow", "target window"])
        .ok_or(InductError::MissingColumn("target_window"))?;
    let note = column(header, &["note"]);

    Ok(records[1..]
        .iter()
        .map(|record| Task {
            id: Uuid::new_v4().to_string(),
            title: cell(record, title),
            category: cell(record, category),
            target_window: cell(record, window),
            note: note
                .map(|i| cell(record, i))
                .filter(|n| !n.is_empty()),
        })
        .collect())
}

fn users_from_csv(content: &str) -> Result<Vec<User>> {
    let records = parse_csv(content);
    let header = records.first().ok_or(InductError::MissingColumn("name"))?;
    let name = column(header, &["name"]).ok_or(InductError::MissingColumn("name"))?;
    let role = column(header, &["role"]).ok_or(InductError::MissingColumn("role"))?;

    records[1..]
        .iter()
        .map(|record| {
            Ok(User {
                id: Uuid::new_v4().to_string(),
                name: cell(record, name),
                role: parse_role(&cell(record, role))?,
            })
        })
        .collect()
}

fn parse_role(value: &str) -> Result<Role> {
    match value.to_lowercase().as_str() {
        "trainee" => Ok(Role::Trainee),
        "instructor" => Ok(Role::Instructor),
        "admin" => Ok(Role::Admin),
        other => Err(InductError::InvalidRole(other.to_string())),
    }
}

fn column(header: &[String], names: &[&str]) -> Option<usize> {
    header
        .iter()
        .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
}

fn cell(record: &[String], index: usize) -> String {
    record.get(index).map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Minimal CSV reader: comma-separated, double-quote quoting with `""`
/// escapes, quoted fields may span lines. Blank records are skipped.
fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    quoted = false;
                }
            }
            '"' if field.is_empty() => quoted = true,
            ',' if !quoted => {
                record.push(std::mem::take(&mut field));
            }
            '\n' if !quoted => {
                record.push(std::mem::take(&mut field));
                if record.iter().any(|f| !f.trim().is_empty()) {
                    records.push(std::mem::take(&mut record));
                } else {
                    record.clear();
                }
            }
            '\r' if !quoted => {}
            _ => field.push(c),
        }
    }
    record.push(field);
    if record.iter().any(|f| !f.trim().is_empty()) {
        records.push(record);
    }

    records
}
