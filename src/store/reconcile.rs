use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use crate::model::{Assignment, Status, Task};

/// Materialize the assignments a trainee is missing.
///
/// For every catalog task with no (task, trainee) record in `existing`, one
/// new assignment is created: default status, notes seeded from the task's
/// catalog note, audit fields stamped to the trainee. Only the newly created
/// records are returned; pre-existing ones are never touched. The merge is
/// additive and idempotent, so it is safe to call speculatively on every
/// load; a second pass over the merged set creates nothing. Catalog growth
/// is handled by the same path: tasks added after the initial backfill just
/// show up as missing pairs.
pub fn reconcile(trainee_id: &str, tasks: &[Task], existing: &[Assignment]) -> Vec<Assignment> {
    let covered: HashSet<&str> = existing
        .iter()
        .filter(|a| a.trainee_id == trainee_id)
        .map(|a| a.task_id.as_str())
        .collect();

    let now = Utc::now();
    tasks
        .iter()
        .filter(|task| !covered.contains(task.id.as_str()))
        .map(|task| Assignment {
            id: Uuid::new_v4().to_string(),
            task_id: task.id.clone(),
            trainee_id: trainee_id.to_string(),
            status: Status::default(),
            notes: task.note.clone(),
            updated_at: now,
            updated_by: trainee_id.to_string(),
        })
        .collect()
}
