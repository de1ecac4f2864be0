use std::path::Path;

use crate::error::Result;
use crate::store::blobs::BlobStore;

pub fn run(dir: &Path) -> Result<()> {
    BlobStore::init(dir)?;
    eprintln!("Initialized .induct/ in {}", dir.display());
    eprintln!("Fill the catalog with `induct import` before logging in.");
    Ok(())
}
