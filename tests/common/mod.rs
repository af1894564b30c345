#![allow(dead_code)]

use procgate::exec::{Gateway, ProcessRegistry};
use tempfile::TempDir;

use procgate_test_utils::config_in;
pub use procgate_test_utils::with_timeout;

/// Gateway whose default working directory and root prefix are a fresh
/// temp dir. Keep the `TempDir` alive for the duration of the test.
pub fn gateway() -> (Gateway, ProcessRegistry, TempDir) {
    let dir = TempDir::new().unwrap();
    let registry = ProcessRegistry::new();
    let gateway = Gateway::new(config_in(dir.path()), registry.clone());
    (gateway, registry, dir)
}
