// src/exec/activation/wrapper.rs

//! Activation script wrappers.
//!
//! A wrapper takes the real command and produces something that first
//! activates the target environment and then runs it: usually a generated
//! script plus the argv that executes that script.

use std::ffi::OsString;
use std::fmt::Debug;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::errors::{GatewayError, Result};

/// Inputs to [`ScriptWrapper::wrap`].
#[derive(Debug, Clone, Copy)]
pub struct WrapRequest<'a> {
    /// Root of the host installation (where the manager itself lives).
    pub root_prefix: &'a Path,
    /// Environment prefix to activate.
    pub prefix: &'a Path,
    pub dev: bool,
    pub debug: bool,
    pub args: &'a [OsString],
}

/// What to actually execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedCommand {
    /// Generated script the caller must clean up, if one was written.
    pub script: Option<PathBuf>,
    pub argv: Vec<OsString>,
}

/// Produces the wrapped command for an activation-aware run.
///
/// Must not have side effects beyond writing the script file, and the same
/// request must produce an equivalent result.
pub trait ScriptWrapper: Send + Sync + Debug {
    fn wrap(&self, request: &WrapRequest<'_>) -> Result<WrappedCommand>;
}

/// Runs the arguments unchanged, without writing any script.
#[derive(Debug, Clone, Default)]
pub struct PassthroughWrapper;

impl ScriptWrapper for PassthroughWrapper {
    fn wrap(&self, request: &WrapRequest<'_>) -> Result<WrappedCommand> {
        Ok(WrappedCommand {
            script: None,
            argv: request.args.to_vec(),
        })
    }
}

/// Writes a POSIX `sh` script that hooks the manager's shell integration,
/// activates the prefix and runs the command.
#[derive(Debug, Clone)]
pub struct PosixActivationWrapper {
    shell: PathBuf,
}

impl Default for PosixActivationWrapper {
    fn default() -> Self {
        Self {
            shell: PathBuf::from("/bin/sh"),
        }
    }
}

impl PosixActivationWrapper {
    pub fn with_shell(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    /// Body of the generated script.
    pub fn render(&self, request: &WrapRequest<'_>) -> String {
        let root = request.root_prefix;
        let prefix = quote_path(request.prefix);
        let (hook, dev_arg) = if request.dev {
            (
                format!(
                    "{} -m conda shell.posix hook --dev",
                    quote_path(&root.join("bin").join("python"))
                ),
                " --dev",
            )
        } else {
            (
                format!(
                    "{} shell.posix hook",
                    quote_path(&root.join("bin").join("conda"))
                ),
                "",
            )
        };

        let words: Vec<String> = request
            .args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        let mut script = String::from("#!/bin/sh\n");
        script.push_str(&format!("eval \"$({hook})\"\n"));
        script.push_str(&format!("conda activate{dev_arg} {prefix}\n"));
        script.push_str(&shell_words::join(&words));
        script.push('\n');
        script
    }
}

impl ScriptWrapper for PosixActivationWrapper {
    fn wrap(&self, request: &WrapRequest<'_>) -> Result<WrappedCommand> {
        let body = self.render(request);

        let mut file = tempfile::Builder::new()
            .prefix("procgate-run-")
            .suffix(".sh")
            .tempfile()
            .map_err(|e| GatewayError::Wrapper(format!("creating script: {e}")))?;
        file.write_all(body.as_bytes())
            .map_err(|e| GatewayError::Wrapper(format!("writing script: {e}")))?;

        // Ownership of the file moves to the caller's cleanup guard.
        let (_file, script) = file
            .keep()
            .map_err(|e| GatewayError::Wrapper(format!("persisting script: {}", e.error)))?;

        debug!(script = %script.display(), prefix = %request.prefix.display(), "wrote activation script");

        let mut argv = vec![self.shell.clone().into_os_string()];
        if request.debug {
            argv.push(OsString::from("-x"));
        }
        argv.push(script.clone().into_os_string());

        Ok(WrappedCommand {
            script: Some(script),
            argv,
        })
    }
}

fn quote_path(path: &Path) -> String {
    shell_words::quote(&path.to_string_lossy()).into_owned()
}

/// Wrapper used when none is configured explicitly.
pub fn default_script_wrapper() -> Arc<dyn ScriptWrapper> {
    if cfg!(unix) {
        Arc::new(PosixActivationWrapper::default())
    } else {
        Arc::new(PassthroughWrapper)
    }
}
