use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Assignment, Filters, Role, Status, Task, User};

/// Apply the compound view filter to the task catalog.
///
/// All four predicates must pass: case-insensitive substring search over the
/// task title or the notes of any of its assignments (across all trainees),
/// category, target window, and the completed-only toggle (at least one done
/// assignment from any trainee). Catalog order is preserved; pure function.
pub fn apply_filters<'a>(
    tasks: &'a [Task],
    assignments: &[Assignment],
    filters: &Filters,
) -> Vec<&'a Task> {
    let needle = filters.search.to_lowercase();

    tasks
        .iter()
        .filter(|task| {
            needle.is_empty()
                || task.title.to_lowercase().contains(&needle)
                || assignments.iter().any(|a| {
                    a.task_id == task.id
                        && a.notes
                            .as_deref()
                            .unwrap_or_default()
                            .to_lowercase()
                            .contains(&needle)
                })
        })
        .filter(|task| filters.category.matches(&task.category))
        .filter(|task| filters.target_window.matches(&task.target_window))
        .filter(|task| {
            !filters.show_only_completed
                || assignments
                    .iter()
                    .any(|a| a.task_id == task.id && a.status == Status::Done)
        })
        .collect()
}

/// One visible line of the checklist: a surviving task joined with one of its
/// assignments, or a placeholder when a staff viewer looks at a task no
/// trainee has a record for yet.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub task: &'a Task,
    pub assignment: Option<&'a Assignment>,
}

/// Expand the filtered task list into per-assignment rows for the viewer.
///
/// Trainees see only their own assignment per task and never placeholder
/// rows. Instructors and admins see one row per trainee assignment, plus a
/// single placeholder row for a task with none. With nobody logged in the
/// expansion behaves like the staff view minus the placeholders.
pub fn visible_rows<'a>(
    tasks: &'a [Task],
    assignments: &'a [Assignment],
    current_user: Option<&User>,
    filters: &Filters,
) -> Vec<Row<'a>> {
    let mut rows = Vec::new();

    for task in apply_filters(tasks, assignments, filters) {
        let matching: Vec<&Assignment> = assignments
            .iter()
            .filter(|a| {
                a.task_id == task.id
                    && match current_user {
                        Some(user) if user.role == Role::Trainee => a.trainee_id == user.id,
                        _ => true,
                    }
            })
            .collect();

        if matching.is_empty() {
            if current_user.is_some_and(|u| u.role.is_staff()) {
                rows.push(Row {
                    task,
                    assignment: None,
                });
            }
            continue;
        }

        rows.extend(matching.into_iter().map(|assignment| Row {
            task,
            assignment: Some(assignment),
        }));
    }

    rows
}

/// Fully denormalized row: task, assignment, and user joins already applied.
/// This is the view handed to export collaborators and printers. Dangling
/// references resolve to empty text rather than an error.
#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    pub task_id: String,
    /// Empty for staff placeholder rows.
    pub trainee_id: String,
    pub task_title: String,
    pub category: String,
    pub target_window: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    pub notes: String,
    pub trainee: String,
    pub updated_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

pub fn resolve_rows(rows: &[Row<'_>], users: &[User]) -> Vec<RowView> {
    let name_of = |id: &str| {
        users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.name.clone())
            .unwrap_or_default()
    };

    rows.iter()
        .map(|row| {
            let task = row.task;
            match row.assignment {
                Some(a) => RowView {
                    task_id: task.id.clone(),
                    trainee_id: a.trainee_id.clone(),
                    task_title: task.title.clone(),
                    category: task.category.clone(),
                    target_window: task.target_window.clone(),
                    status: Some(a.status),
                    notes: a.notes.clone().unwrap_or_default(),
                    trainee: name_of(&a.trainee_id),
                    updated_by: name_of(&a.updated_by),
                    updated_at: Some(a.updated_at),
                },
                None => RowView {
                    task_id: task.id.clone(),
                    trainee_id: String::new(),
                    task_title: task.title.clone(),
                    category: task.category.clone(),
                    target_window: task.target_window.clone(),
                    status: None,
                    notes: String::new(),
                    trainee: String::new(),
                    updated_by: String::new(),
                    updated_at: None,
                },
            }
        })
        .collect()
}
