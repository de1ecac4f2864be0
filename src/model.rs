use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[clap(rename_all = "kebab-case")]
pub enum Role {
    Trainee,
    Instructor,
    Admin,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[clap(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    NotDone,
    Observed,
    Done,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trainee => write!(f, "trainee"),
            Self::Instructor => write!(f, "instructor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl Role {
    /// Instructors and admins oversee every trainee's checklist.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Instructor | Self::Admin)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotDone => write!(f, "not-done"),
            Self::Observed => write!(f, "observed"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Catalog user. Read-only at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Catalog task. Created at catalog-build time, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub category: String,
    pub target_window: String,
    /// Seed text copied into newly created assignments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Per-(task, trainee) progress record. The only mutable entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: String,
    pub task_id: String,
    pub trainee_id: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
}

/// Partial update applied through the single assignment mutation entry point.
#[derive(Debug, Default, Clone)]
pub struct AssignmentPatch {
    pub status: Option<Status>,
    pub notes: Option<String>,
}

/// Value filter for a single task attribute.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Scope {
    #[default]
    All,
    Only(String),
}

impl Scope {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

/// Session-scoped view filters. Never persisted; reset each session.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Filters {
    pub search: String,
    pub category: Scope,
    pub target_window: Scope,
    pub show_only_completed: bool,
}

/// Partial filter update; only supplied fields change.
#[derive(Debug, Default, Clone)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub category: Option<Scope>,
    pub target_window: Option<Scope>,
    pub show_only_completed: Option<bool>,
}

impl Filters {
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(target_window) = patch.target_window {
            self.target_window = target_window;
        }
        if let Some(show_only_completed) = patch.show_only_completed {
            self.show_only_completed = show_only_completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn assignment_round_trips_json() {
        let now = Utc::now();
        let assignment = Assignment {
            id: "a-1".into(),
            task_id: "t-1".into(),
            trainee_id: "u-1".into(),
            status: Status::Observed,
            notes: Some("watched during night shift".into()),
            updated_at: now,
            updated_by: "u-2".into(),
        };

        let json = serde_json::to_string_pretty(&assignment).unwrap();
        let parsed: Assignment = serde_json::from_str(&json).unwrap();
        assert_eq!(assignment, parsed);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&Status::NotDone).unwrap();
        assert_eq!(json, r#""not-done""#);
        let json = serde_json::to_string(&Status::Done).unwrap();
        assert_eq!(json, r#""done""#);
    }

    #[test]
    fn assignment_without_notes_omits_the_field() {
        let assignment = Assignment {
            id: "a-1".into(),
            task_id: "t-1".into(),
            trainee_id: "u-1".into(),
            status: Status::default(),
            notes: None,
            updated_at: Utc::now(),
            updated_by: "u-1".into(),
        };

        let json = serde_json::to_string(&assignment).unwrap();
        assert!(!json.contains("notes"));
    }

    #[test]
    fn default_status_is_not_done() {
        assert_eq!(Status::default(), Status::NotDone);
    }

    #[test]
    fn staff_roles() {
        assert!(!Role::Trainee.is_staff());
        assert!(Role::Instructor.is_staff());
        assert!(Role::Admin.is_staff());
    }

    #[test]
    fn scope_all_matches_everything() {
        assert!(Scope::All.matches("anything"));
        assert!(Scope::Only("skills".into()).matches("skills"));
        assert!(!Scope::Only("skills".into()).matches("safety"));
    }

    #[test]
    fn filter_patch_only_touches_supplied_fields() {
        let mut filters = Filters {
            search: "iv".into(),
            category: Scope::Only("skills".into()),
            target_window: Scope::All,
            show_only_completed: false,
        };

        filters.apply(FilterPatch {
            show_only_completed: Some(true),
            ..FilterPatch::default()
        });

        assert_eq!(filters.search, "iv");
        assert_eq!(filters.category, Scope::Only("skills".into()));
        assert!(filters.show_only_completed);
    }
}
