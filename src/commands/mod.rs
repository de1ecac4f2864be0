pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod login;
pub mod logout;
pub mod set;
pub mod summary;
pub mod users;

use std::path::Path;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{Scope, User};
use crate::resolve::resolve_user;
use crate::session::Session;
use crate::store::blobs::BlobStore;

/// Resolve who is acting: an explicit `--as` selection wins, then the
/// persisted login. The session core never reads the login slot itself; this
/// is the CLI-layer counterpart of the role-selection screen.
pub(crate) fn acting_user(
    store: &BlobStore,
    users: &[User],
    as_user: Option<&str>,
) -> Result<Option<User>> {
    match as_user {
        Some(input) => Ok(Some(resolve_user(input, users)?.clone())),
        None => Ok(store.current_user()),
    }
}

/// Build a loaded session for one command invocation: catalog + persisted
/// assignments in, acting user selected, reconciliation already run.
pub(crate) fn open_session(root: &Path, as_user: Option<&str>) -> Result<Session> {
    let store = BlobStore::open(root)?;
    let catalog = Catalog::load(store.root())?;
    let user = acting_user(&store, &catalog.users, as_user)?;

    let mut session = Session::new(store);
    session.load_data(catalog);
    session.set_current_user(user);
    Ok(session)
}

/// Map an optional filter flag onto a scope patch: absent leaves the filter
/// untouched, the literal "all" disables it, anything else narrows to it.
pub(crate) fn scope_arg(value: Option<String>) -> Option<Scope> {
    value.map(|v| {
        if v == "all" {
            Scope::All
        } else {
            Scope::Only(v)
        }
    })
}
