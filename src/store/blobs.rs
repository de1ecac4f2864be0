use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{InductError, Result};
use crate::model::{Assignment, User};

/// Persistent key-value adapter over the `.induct` data root.
///
/// Two logical slots: the assignment collection and the selected user, each a
/// serialized JSON blob. Reads never fail: a missing or malformed blob yields
/// the empty default. Writes complete before the calling mutation returns;
/// a failed write is logged and the in-memory state stays authoritative for
/// the rest of the session.
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Open an existing .induct directory.
    pub fn open(dir: &Path) -> Result<Self> {
        let root = dir.join(".induct");
        if !root.join("config.json").exists() {
            return Err(InductError::NotInitialized);
        }
        Ok(Self { root })
    }

    /// Initialize a new .induct directory with an empty catalog.
    pub fn init(dir: &Path) -> Result<Self> {
        let root = dir.join(".induct");
        if root.join("config.json").exists() {
            return Err(InductError::AlreadyInitialized);
        }

        fs::create_dir_all(root.join("state"))?;
        fs::create_dir_all(root.join("catalog"))?;
        fs::write(root.join("catalog").join("tasks.json"), "[]")?;
        fs::write(root.join("catalog").join("users.json"), "[]")?;
        fs::write(root.join("config.json"), r#"{"version": 1}"#)?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn assignments_path(&self) -> PathBuf {
        self.root.join("state").join("assignments.json")
    }

    fn current_user_path(&self) -> PathBuf {
        self.root.join("state").join("current_user.json")
    }

    /// The full assignment collection; empty on missing or unreadable blob.
    pub fn assignments(&self) -> Vec<Assignment> {
        read_or_default(&self.assignments_path())
    }

    /// Replace the whole assignment blob. Failures are logged, not surfaced.
    pub fn set_assignments(&self, assignments: &[Assignment]) {
        write_blob(&self.assignments_path(), assignments);
    }

    /// The persisted user selection; None on missing or unreadable blob.
    pub fn current_user(&self) -> Option<User> {
        read_or_default::<Option<User>>(&self.current_user_path())
    }

    /// Persist or clear the user selection. Failures are logged, not surfaced.
    pub fn set_current_user(&self, user: Option<&User>) {
        match user {
            Some(user) => write_blob(&self.current_user_path(), user),
            None => {
                let path = self.current_user_path();
                if path.exists()
                    && let Err(e) = fs::remove_file(&path)
                {
                    eprintln!("failed to clear {}: {e}", path.display());
                }
            }
        }
    }
}

fn read_or_default<T: serde::de::DeserializeOwned + Default>(path: &Path) -> T {
    let Ok(data) = fs::read_to_string(path) else {
        return T::default();
    };
    serde_json::from_str(&data).unwrap_or_default()
}

fn write_blob<T: serde::Serialize + ?Sized>(path: &Path, value: &T) {
    let result = serde_json::to_string_pretty(value)
        .map_err(InductError::from)
        .and_then(|json| fs::write(path, json).map_err(InductError::from));
    if let Err(e) = result {
        eprintln!("failed to write {}: {e}", path.display());
    }
}

/// Walk up from the current directory to find the .induct root.
pub fn find_data_root() -> Result<PathBuf> {
    let mut dir = std::env::current_dir().map_err(InductError::Io)?;
    loop {
        if dir.join(".induct").exists() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(InductError::NotInitialized);
        }
    }
}
