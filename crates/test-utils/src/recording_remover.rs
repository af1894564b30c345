use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use procgate::fs::{PathRemover, RealFileSystem};

/// A path remover that records what it was asked to delete.
///
/// By default it also deletes for real; `failing()` builds one that always
/// errors instead, for checking that cleanup failures don't escape.
#[derive(Debug, Clone, Default)]
pub struct RecordingRemover {
    removed: Arc<Mutex<Vec<PathBuf>>>,
    fail: bool,
}

impl RecordingRemover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            removed: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    pub fn removed(&self) -> Vec<PathBuf> {
        self.removed.lock().unwrap().clone()
    }
}

impl PathRemover for RecordingRemover {
    fn remove_path(&self, path: &Path) -> Result<()> {
        self.removed.lock().unwrap().push(path.to_path_buf());
        if self.fail {
            return Err(anyhow!("refusing to remove {:?}", path));
        }
        RealFileSystem.remove_path(path)
    }
}
