//! Scratch directory trees for unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory that is deleted when dropped.
pub struct TestDir(TempDir);

impl TestDir {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self(tempfile::tempdir().unwrap())
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// Creates `rel` and every missing parent.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `content` to `rel`, creating parents as needed.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Writes a `.spada.toml` inside `dir` (`""` for the root).
    pub fn config(&self, dir: &str, content: &str) -> PathBuf {
        self.write(&Path::new(dir).join(CONFIG_FILENAME).to_string_lossy(), content)
    }
}
