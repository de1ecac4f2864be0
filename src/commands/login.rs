use std::path::Path;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::resolve::resolve_user;
use crate::store::blobs::BlobStore;

pub fn run(root: &Path, input: &str) -> Result<()> {
    let store = BlobStore::open(root)?;
    let catalog = Catalog::load(store.root())?;

    let user = resolve_user(input, &catalog.users)?;
    store.set_current_user(Some(user));
    println!("logged in as {} ({})", user.name, user.role);
    Ok(())
}
