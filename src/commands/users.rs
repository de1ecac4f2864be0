use std::path::Path;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::output::{self, Format};
use crate::store::blobs::BlobStore;

pub fn run(root: &Path, format: Format) -> Result<()> {
    let store = BlobStore::open(root)?;
    let catalog = Catalog::load(store.root())?;
    output::print_users(&catalog.users, format)
}
