use std::path::Path;

use crate::error::{InductError, Result};
use crate::filter::{self, Row};
use crate::model::{AssignmentPatch, Role, Status};
use crate::output::{self, Format};
use crate::resolve::{resolve_id, resolve_user};

/// Mutate one assignment, addressed by task plus trainee.
///
/// Input resolution happens up front so unknown or ambiguous ids surface as
/// user errors; the session core itself treats unknown ids as a no-op.
pub fn run(
    root: &Path,
    task: &str,
    trainee: Option<&str>,
    status: Option<Status>,
    notes: Option<String>,
    as_user: Option<String>,
    format: Format,
) -> Result<()> {
    let mut session = super::open_session(root, as_user.as_deref())?;
    let actor = session
        .current_user
        .clone()
        .ok_or(InductError::NoCurrentUser)?;

    let task_id = resolve_id(task, session.tasks.iter().map(|t| t.id.as_str()))?;

    let trainee_id = match trainee {
        Some(input) => {
            let user = resolve_user(input, &session.users)?;
            if user.role != Role::Trainee {
                return Err(InductError::NotATrainee(user.name.clone()));
            }
            user.id.clone()
        }
        None if actor.role == Role::Trainee => actor.id.clone(),
        None => return Err(InductError::TraineeRequired),
    };

    if !session.can_edit_trainee(&trainee_id) {
        return Err(InductError::EditNotPermitted(actor.name));
    }

    let assignment_id = session
        .find_assignment(&task_id, &trainee_id)
        .map(|a| a.id.clone())
        .ok_or_else(|| InductError::IdNotFound(task.to_string()))?;

    session.update_assignment(&assignment_id, AssignmentPatch { status, notes });

    let updated = session
        .assignments
        .iter()
        .find(|a| a.id == assignment_id)
        .expect("assignment survives update");
    let task = session
        .tasks
        .iter()
        .find(|t| t.id == task_id)
        .expect("resolved task exists");
    let rows = filter::resolve_rows(
        &[Row {
            task,
            assignment: Some(updated),
        }],
        &session.users,
    );
    output::print_rows(&rows, format)
}
