use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::{Role, Task, User};

/// Immutable reference data: the task list and the user list.
///
/// Loaded once per session from `catalog/` under the data root. Id uniqueness
/// is assumed to hold at catalog-build time and is not re-validated here.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub tasks: Vec<Task>,
    pub users: Vec<User>,
}

impl Catalog {
    pub fn load(data_root: &Path) -> Result<Self> {
        let dir = data_root.join("catalog");
        let tasks: Vec<Task> = serde_json::from_str(&fs::read_to_string(dir.join("tasks.json"))?)?;
        let users: Vec<User> = serde_json::from_str(&fs::read_to_string(dir.join("users.json"))?)?;
        Ok(Self { tasks, users })
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn trainees(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| u.role == Role::Trainee)
    }

    /// Distinct category values in sorted order, for filter option lists.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.tasks.iter().map(|t| t.category.as_str()))
    }

    /// Distinct target-window labels in sorted order.
    pub fn target_windows(&self) -> Vec<String> {
        distinct(self.tasks.iter().map(|t| t.target_window.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values.map(str::to_string).collect();
    out.sort();
    out.dedup();
    out
}
