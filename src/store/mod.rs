pub mod blobs;
pub mod reconcile;
