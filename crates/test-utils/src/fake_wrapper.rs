use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use procgate::errors::{GatewayError, Result};
use procgate::exec::{ScriptWrapper, WrapRequest, WrappedCommand};
use tempfile::TempDir;

/// Owned copy of a [`WrapRequest`] the fake received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrap {
    pub root_prefix: PathBuf,
    pub prefix: PathBuf,
    pub dev: bool,
    pub debug: bool,
    pub args: Vec<OsString>,
}

/// A script wrapper that:
/// - records every request
/// - writes a small `sh` script exporting `ACTIVATED_PREFIX` and then
///   running the arguments
///
/// No real environment manager is needed.
#[derive(Debug)]
pub struct FakeScriptWrapper {
    dir: TempDir,
    counter: AtomicUsize,
    requests: Arc<Mutex<Vec<RecordedWrap>>>,
    scripts: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeScriptWrapper {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("creating temp dir for fake scripts"),
            counter: AtomicUsize::new(0),
            requests: Arc::new(Mutex::new(Vec::new())),
            scripts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<RecordedWrap> {
        self.requests.lock().unwrap().clone()
    }

    /// Paths of every script written so far.
    pub fn scripts(&self) -> Vec<PathBuf> {
        self.scripts.lock().unwrap().clone()
    }
}

impl Default for FakeScriptWrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptWrapper for FakeScriptWrapper {
    fn wrap(&self, request: &WrapRequest<'_>) -> Result<WrappedCommand> {
        self.requests.lock().unwrap().push(RecordedWrap {
            root_prefix: request.root_prefix.to_path_buf(),
            prefix: request.prefix.to_path_buf(),
            dev: request.dev,
            debug: request.debug,
            args: request.args.to_vec(),
        });

        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let script = self.dir.path().join(format!("wrapper-{n}.sh"));

        let words: Vec<String> = request
            .args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let body = format!(
            "#!/bin/sh\nexport ACTIVATED_PREFIX={}\n{}\n",
            shell_words::quote(&request.prefix.to_string_lossy()),
            shell_words::join(&words),
        );
        fs::write(&script, body).map_err(|e| GatewayError::Wrapper(e.to_string()))?;
        self.scripts.lock().unwrap().push(script.clone());

        Ok(WrappedCommand {
            script: Some(script.clone()),
            argv: vec![OsString::from("sh"), script.into_os_string()],
        })
    }
}
