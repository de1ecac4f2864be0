use std::path::Path;

use crate::error::Result;
use crate::store::blobs::BlobStore;

pub fn run(root: &Path) -> Result<()> {
    let store = BlobStore::open(root)?;
    store.set_current_user(None);
    println!("logged out");
    Ok(())
}
