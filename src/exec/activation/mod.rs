// src/exec/activation/mod.rs

//! Activation-aware execution.
//!
//! The command is wrapped by a [`ScriptWrapper`] so it runs inside an
//! activated environment prefix. Output is collected as raw bytes and decoded
//! with replacement. A generated script is removed afterwards on every exit
//! path via [`ScriptCleanup`], unless temporary files are being retained.

pub mod wrapper;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::SAVE_TEMPS_ENV;
use crate::config::loader::retain_temps_from_env;
use crate::errors::{GatewayError, Result};
use crate::exec::env::{Environment, encode_environment};
use crate::exec::output::{communicate, decode_lossy};
use crate::exec::runner::Gateway;
use crate::fs::PathRemover;
use crate::types::{Response, returncode_of};

pub use wrapper::{
    PassthroughWrapper, PosixActivationWrapper, ScriptWrapper, WrapRequest, WrappedCommand,
    default_script_wrapper,
};

/// Deletes a generated script when dropped.
///
/// With retention on, the file is left in place and a warning is logged.
#[derive(Debug)]
pub struct ScriptCleanup {
    script: PathBuf,
    remover: Arc<dyn PathRemover>,
    retain: bool,
}

impl ScriptCleanup {
    pub fn new(script: PathBuf, remover: Arc<dyn PathRemover>, retain: bool) -> Self {
        Self {
            script,
            remover,
            retain,
        }
    }

    pub fn path(&self) -> &Path {
        &self.script
    }
}

impl Drop for ScriptCleanup {
    fn drop(&mut self) {
        if self.retain {
            warn!(
                script = %self.script.display(),
                "{SAVE_TEMPS_ENV} :: retaining activation run script"
            );
            return;
        }

        if let Err(e) = self.remover.remove_path(&self.script) {
            warn!(
                script = %self.script.display(),
                error = %e,
                "failed to remove activation run script"
            );
        }
    }
}

impl Gateway {
    /// Run `args` inside the environment at `prefix`.
    ///
    /// The working directory defaults to `prefix`; `env = None` inherits the
    /// ambient environment. A nonzero exit is never an error here: inspect
    /// `returncode` on the returned [`Response`].
    pub async fn run_in_prefix(
        &self,
        args: &[OsString],
        prefix: &Path,
        cwd: Option<&Path>,
        env: Option<&Environment>,
    ) -> Result<Response> {
        let request = WrapRequest {
            root_prefix: &self.config.root_prefix,
            prefix,
            dev: self.config.dev,
            debug: self.config.debug,
            args,
        };
        let wrapped = self.wrapper.wrap(&request)?;

        let _cleanup = wrapped.script.clone().map(|script| {
            ScriptCleanup::new(script, Arc::clone(&self.remover), self.retain_temp_files())
        });

        let (program, rest) = wrapped
            .argv
            .split_first()
            .ok_or_else(|| GatewayError::Wrapper("wrapper produced an empty command".to_string()))?;

        let shown = wrapped
            .argv
            .iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(prefix = %prefix.display(), "executing>> {shown}");

        let mut cmd = Command::new(program);
        cmd.args(rest)
            .current_dir(cwd.unwrap_or(prefix))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(env) = env {
            cmd.env_clear().envs(encode_environment(Some(env)));
        }

        let mut child = cmd.spawn()?;
        let (registration, cancel_rx) = self.registry.register(child.id(), &shown);

        let collected = communicate(&mut child, None, cancel_rx, &shown).await;
        registration.release();
        let collected = collected?;

        Ok(Response {
            stdout: decode_lossy(&collected.stdout),
            stderr: decode_lossy(&collected.stderr),
            returncode: returncode_of(&collected.status),
        })
    }

    fn retain_temp_files(&self) -> bool {
        self.config.retain_temp_files || retain_temps_from_env()
    }
}
