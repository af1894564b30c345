// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

/// Recursive, forced path removal.
///
/// Used to clean up generated wrapper scripts. Implementations should treat
/// an already-missing path as success.
pub trait PathRemover: Send + Sync + Debug {
    fn remove_path(&self, path: &Path) -> Result<()>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl PathRemover for RealFileSystem {
    fn remove_path(&self, path: &Path) -> Result<()> {
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e).with_context(|| format!("inspecting {:?}", path)),
        };

        // Symlinks are removed themselves, never followed.
        let res = if meta.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };

        match res {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied && !meta.is_dir() => {
                // Read-only file: clear the flag and try once more.
                let mut perms = meta.permissions();
                #[allow(clippy::permissions_set_readonly_false)]
                perms.set_readonly(false);
                fs::set_permissions(path, perms)
                    .and_then(|_| fs::remove_file(path))
                    .with_context(|| format!("removing read-only file {:?}", path))
            }
            Err(e) => Err(e).with_context(|| format!("removing {:?}", path)),
        }
    }
}
