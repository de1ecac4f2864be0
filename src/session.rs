use chrono::Utc;

use crate::catalog::Catalog;
use crate::filter::{self, Row, RowView};
use crate::model::{Assignment, AssignmentPatch, FilterPatch, Filters, Role, Task, User};
use crate::progress::{self, Summary};
use crate::store::blobs::BlobStore;
use crate::store::reconcile;

/// Live session state: catalog copies, the assignment set, the active user,
/// and the view filters. Every assignment mutation is flushed whole to the
/// blob store before it returns.
pub struct Session {
    pub tasks: Vec<Task>,
    pub users: Vec<User>,
    pub assignments: Vec<Assignment>,
    pub current_user: Option<User>,
    pub filters: Filters,
    ready: bool,
    store: BlobStore,
}

impl Session {
    /// An empty, not-yet-loaded session. Reconciliation and aggregation stay
    /// inert until `load_data` flips the ready flag.
    pub fn new(store: BlobStore) -> Self {
        Self {
            tasks: Vec::new(),
            users: Vec::new(),
            assignments: Vec::new(),
            current_user: None,
            filters: Filters::default(),
            ready: false,
            store,
        }
    }

    pub fn ready(&self) -> bool {
        self.ready
    }

    /// Install the catalog and the persisted assignment set.
    ///
    /// The persisted user selection is deliberately not consulted: every
    /// session starts unauthenticated and requires an explicit
    /// `set_current_user`.
    pub fn load_data(&mut self, catalog: Catalog) {
        self.tasks = catalog.tasks;
        self.users = catalog.users;
        self.assignments = self.store.assignments();
        self.ready = true;
        self.reconcile_active();
    }

    /// Replace the active user; `None` is logout.
    pub fn set_current_user(&mut self, user: Option<User>) {
        self.current_user = user;
        self.reconcile_active();
    }

    /// Backfill missing assignments for whoever the active user can see.
    ///
    /// A trainee gets their own set completed; a staff user triggers the same
    /// pass for every cataloged trainee. Idempotent, so it runs on every
    /// login and load without further trigger bookkeeping.
    fn reconcile_active(&mut self) {
        if !self.ready {
            return;
        }
        let Some(user) = &self.current_user else {
            return;
        };

        let trainee_ids: Vec<String> = if user.role == Role::Trainee {
            vec![user.id.clone()]
        } else {
            self.users
                .iter()
                .filter(|u| u.role == Role::Trainee)
                .map(|u| u.id.clone())
                .collect()
        };

        let mut created = Vec::new();
        for trainee_id in trainee_ids {
            created.extend(reconcile::reconcile(
                &trainee_id,
                &self.tasks,
                &self.assignments,
            ));
        }

        if !created.is_empty() {
            self.assignments.extend(created);
            self.store.set_assignments(&self.assignments);
        }
    }

    /// Merge a partial update into one assignment, stamping the audit fields.
    /// Unknown ids are a silent no-op.
    pub fn update_assignment(&mut self, assignment_id: &str, patch: AssignmentPatch) {
        let actor = self
            .current_user
            .as_ref()
            .map(|u| u.id.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let Some(assignment) = self.assignments.iter_mut().find(|a| a.id == assignment_id) else {
            return;
        };

        if let Some(status) = patch.status {
            assignment.status = status;
        }
        if let Some(notes) = patch.notes {
            assignment.notes = if notes.trim().is_empty() {
                None
            } else {
                Some(notes)
            };
        }
        assignment.updated_at = Utc::now();
        assignment.updated_by = actor;

        self.store.set_assignments(&self.assignments);
    }

    /// Shallow-merge view filters. Session state only, never persisted.
    pub fn set_filters(&mut self, patch: FilterPatch) {
        self.filters.apply(patch);
    }

    /// The one capability predicate for mutation rights: an assignment may be
    /// edited by its own trainee or by any instructor/admin.
    pub fn can_edit(&self, assignment: &Assignment) -> bool {
        self.can_edit_trainee(&assignment.trainee_id)
    }

    /// Same predicate keyed by trainee, for callers that have not located a
    /// concrete assignment yet.
    pub fn can_edit_trainee(&self, trainee_id: &str) -> bool {
        match &self.current_user {
            None => false,
            Some(user) if user.role.is_staff() => true,
            Some(user) => trainee_id == user.id,
        }
    }

    pub fn find_assignment(&self, task_id: &str, trainee_id: &str) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.task_id == task_id && a.trainee_id == trainee_id)
    }

    pub fn summary(&self) -> Summary {
        progress::summarize(
            &self.assignments,
            &self.tasks,
            self.current_user.as_ref(),
            &self.users,
        )
    }

    pub fn rows(&self) -> Vec<Row<'_>> {
        filter::visible_rows(
            &self.tasks,
            &self.assignments,
            self.current_user.as_ref(),
            &self.filters,
        )
    }

    pub fn resolved_rows(&self) -> Vec<RowView> {
        filter::resolve_rows(&self.rows(), &self.users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Scope, Status, Task};
    use tempfile::tempdir;

    fn task(id: &str) -> Task {
        Task {
            id: id.into(),
            title: format!("task {id}"),
            category: "skills".into(),
            target_window: "week 1".into(),
            note: None,
        }
    }

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.into(),
            name: id.into(),
            role,
        }
    }

    fn catalog(tasks: Vec<Task>, users: Vec<User>) -> Catalog {
        Catalog { tasks, users }
    }

    fn session_in(dir: &std::path::Path) -> Session {
        Session::new(BlobStore::init(dir).unwrap())
    }

    #[test]
    fn load_data_ignores_the_persisted_user_selection() {
        let dir = tempdir().unwrap();
        let store = BlobStore::init(dir.path()).unwrap();
        store.set_current_user(Some(&user("u-1", Role::Trainee)));

        let mut session = Session::new(BlobStore::open(dir.path()).unwrap());
        session.load_data(catalog(vec![task("t-1")], vec![user("u-1", Role::Trainee)]));

        assert!(session.ready());
        assert!(session.current_user.is_none());
    }

    #[test]
    fn trainee_login_backfills_and_flushes_their_assignments() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.load_data(catalog(
            vec![task("t-1"), task("t-2"), task("t-3")],
            vec![user("u-1", Role::Trainee), user("u-2", Role::Trainee)],
        ));

        session.set_current_user(Some(user("u-1", Role::Trainee)));

        assert_eq!(session.assignments.len(), 3);
        assert!(session.assignments.iter().all(|a| a.trainee_id == "u-1"));
        assert!(session.assignments.iter().all(|a| a.status == Status::NotDone));

        // Flushed through the adapter, not just held in memory.
        let persisted = BlobStore::open(dir.path()).unwrap().assignments();
        assert_eq!(persisted.len(), 3);
    }

    #[test]
    fn staff_login_backfills_every_trainee() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.load_data(catalog(
            vec![task("t-1"), task("t-2")],
            vec![
                user("u-1", Role::Trainee),
                user("u-2", Role::Trainee),
                user("u-3", Role::Instructor),
            ],
        ));

        session.set_current_user(Some(user("u-3", Role::Instructor)));

        assert_eq!(session.assignments.len(), 4);
        assert!(session.find_assignment("t-2", "u-2").is_some());
        // No records for the instructor herself.
        assert!(!session.assignments.iter().any(|a| a.trainee_id == "u-3"));
    }

    #[test]
    fn reconciliation_waits_for_load() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());

        session.set_current_user(Some(user("u-1", Role::Trainee)));
        assert!(session.assignments.is_empty());

        session.load_data(catalog(vec![task("t-1")], vec![user("u-1", Role::Trainee)]));
        assert_eq!(session.assignments.len(), 1);
    }

    #[test]
    fn catalog_growth_is_backfilled_on_the_next_session() {
        let dir = tempdir().unwrap();
        {
            let mut session = session_in(dir.path());
            session.load_data(catalog(vec![task("t-1")], vec![user("u-1", Role::Trainee)]));
            session.set_current_user(Some(user("u-1", Role::Trainee)));
            assert_eq!(session.assignments.len(), 1);
        }

        // Same store, grown catalog.
        let mut session = Session::new(BlobStore::open(dir.path()).unwrap());
        session.load_data(catalog(
            vec![task("t-1"), task("t-2")],
            vec![user("u-1", Role::Trainee)],
        ));
        session.set_current_user(Some(user("u-1", Role::Trainee)));

        assert_eq!(session.assignments.len(), 2);
        let task_ids: Vec<&str> = session
            .assignments
            .iter()
            .map(|a| a.task_id.as_str())
            .collect();
        assert!(task_ids.contains(&"t-1") && task_ids.contains(&"t-2"));
    }

    #[test]
    fn update_stamps_audit_fields_even_for_single_field_patches() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.load_data(catalog(
            vec![task("t-1")],
            vec![user("u-1", Role::Trainee), user("u-3", Role::Instructor)],
        ));
        session.set_current_user(Some(user("u-1", Role::Trainee)));

        let id = session.assignments[0].id.clone();
        let before = session.assignments[0].updated_at;

        session.set_current_user(Some(user("u-3", Role::Instructor)));
        session.update_assignment(
            &id,
            AssignmentPatch {
                status: Some(Status::Observed),
                notes: None,
            },
        );

        let updated = &session.assignments[0];
        assert_eq!(updated.status, Status::Observed);
        assert_eq!(updated.updated_by, "u-3");
        assert!(updated.updated_at >= before);
    }

    #[test]
    fn update_with_unknown_id_is_a_silent_no_op() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.load_data(catalog(vec![task("t-1")], vec![user("u-1", Role::Trainee)]));
        session.set_current_user(Some(user("u-1", Role::Trainee)));

        let before = session.assignments.clone();
        session.update_assignment(
            "missing-id",
            AssignmentPatch {
                status: Some(Status::Done),
                notes: None,
            },
        );

        assert_eq!(session.assignments, before);
    }

    #[test]
    fn blank_notes_patch_clears_the_note() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.load_data(catalog(vec![task("t-1")], vec![user("u-1", Role::Trainee)]));
        session.set_current_user(Some(user("u-1", Role::Trainee)));

        let id = session.assignments[0].id.clone();
        session.update_assignment(
            &id,
            AssignmentPatch {
                status: None,
                notes: Some("practiced twice".into()),
            },
        );
        assert_eq!(session.assignments[0].notes.as_deref(), Some("practiced twice"));

        session.update_assignment(
            &id,
            AssignmentPatch {
                status: None,
                notes: Some("   ".into()),
            },
        );
        assert_eq!(session.assignments[0].notes, None);
    }

    #[test]
    fn can_edit_capability_matrix() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.load_data(catalog(
            vec![task("t-1")],
            vec![user("u-1", Role::Trainee), user("u-2", Role::Trainee)],
        ));
        session.set_current_user(Some(user("u-1", Role::Trainee)));

        let own = session.find_assignment("t-1", "u-1").unwrap().clone();
        let theirs = session.find_assignment("t-1", "u-2").unwrap();
        assert!(session.can_edit(&own));
        assert!(!session.can_edit(theirs));

        let theirs = theirs.clone();
        session.set_current_user(Some(user("u-9", Role::Admin)));
        assert!(session.can_edit(&theirs));

        session.set_current_user(None);
        assert!(!session.can_edit(&theirs));
    }

    #[test]
    fn filters_merge_without_persisting() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.load_data(catalog(vec![], vec![]));

        session.set_filters(FilterPatch {
            search: Some("iv".into()),
            category: Some(Scope::Only("skills".into())),
            ..FilterPatch::default()
        });

        assert_eq!(session.filters.search, "iv");
        assert_eq!(session.filters.category, Scope::Only("skills".into()));
        assert!(!session.filters.show_only_completed);
    }
}
