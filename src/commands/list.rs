use std::path::Path;

use crate::error::Result;
use crate::model::FilterPatch;
use crate::output::{self, Format};

pub fn run(
    root: &Path,
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

    output::print_rows(&session.resolved_rows(), format)
}
