use std::path::Path;

use crate::error::Result;
use crate::output::{self, Format};

pub fn run(root: &Path, as_user: Option<String>, format: Format) -> Result<()> {
    let session = super::open_session(root, as_user.as_deref())?;
    output::print_summary(&session.summary(), format)
}
