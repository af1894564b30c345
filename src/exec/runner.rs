// src/exec/runner.rs

//! The execution core: spawn, feed stdin, wait, collect, report.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tracing::{Level, debug, info, trace};

use crate::config::GatewayConfig;
use crate::errors::{GatewayError, Result};
use crate::exec::activation::{ScriptWrapper, default_script_wrapper};
use crate::exec::command::CommandLine;
use crate::exec::diagnostic::{DIAGNOSTIC_TARGET, Diagnostic};
use crate::exec::env::{Environment, encode_environment};
use crate::exec::output::{communicate, decode_lossy};
use crate::exec::registry::ProcessRegistry;
use crate::fs::{PathRemover, RealFileSystem};
use crate::types::{Response, returncode_of};

/// One invocation of the execution core.
///
/// Defaults: ambient environment, the configured default working directory,
/// no stdin, `raise_on_error = true`, `capture_output = true`.
#[derive(Debug, Clone)]
pub struct SubprocessCall {
    pub(crate) command: CommandLine,
    pub(crate) env: Option<Environment>,
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) stdin: Option<String>,
    pub(crate) raise_on_error: bool,
    pub(crate) capture_output: bool,
}

impl SubprocessCall {
    pub fn new(command: impl Into<CommandLine>) -> Self {
        Self {
            command: command.into(),
            env: None,
            cwd: None,
            stdin: None,
            raise_on_error: true,
            capture_output: true,
        }
    }

    pub fn env(mut self, env: impl Into<Environment>) -> Self {
        self.env = Some(env.into());
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn raise_on_error(mut self, raise: bool) -> Self {
        self.raise_on_error = raise;
        self
    }

    pub fn capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }
}

/// Single entry point for running child processes.
///
/// Cheap to clone; clones share the same [`ProcessRegistry`].
#[derive(Debug, Clone)]
pub struct Gateway {
    pub(crate) config: GatewayConfig,
    pub(crate) registry: ProcessRegistry,
    pub(crate) wrapper: Arc<dyn ScriptWrapper>,
    pub(crate) remover: Arc<dyn PathRemover>,
}

impl Gateway {
    pub fn new(config: GatewayConfig, registry: ProcessRegistry) -> Self {
        Self {
            config,
            registry,
            wrapper: default_script_wrapper(),
            remover: Arc::new(RealFileSystem),
        }
    }

    /// Replace the activation script wrapper.
    pub fn with_script_wrapper(mut self, wrapper: Arc<dyn ScriptWrapper>) -> Self {
        self.wrapper = wrapper;
        self
    }

    /// Replace the collaborator used to delete generated scripts.
    pub fn with_path_remover(mut self, remover: Arc<dyn PathRemover>) -> Self {
        self.remover = remover;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    /// Run a command to completion.
    ///
    /// Returns the [`Response`] whatever the exit code, unless
    /// `raise_on_error` is set and the code is nonzero, in which case a
    /// [`GatewayError::CalledProcess`] carrying the diagnostic is returned.
    /// Spawn failures come back as [`GatewayError::Io`] unchanged.
    ///
    /// Passing stdin without capturing output is rejected before anything
    /// is spawned.
    pub async fn call(&self, call: SubprocessCall) -> Result<Response> {
        let SubprocessCall {
            command,
            env,
            cwd,
            stdin,
            raise_on_error,
            capture_output,
        } = call;

        // Empty input counts as no input.
        let stdin = match stdin {
            Some(input) if !capture_output && input.is_empty() => None,
            Some(_) if !capture_output => {
                return Err(GatewayError::ConfigError(
                    "when passing stdin, output needs to be captured".to_string(),
                ));
            }
            other => other,
        };

        let cwd = self.resolve_cwd(cwd.as_deref())?;
        let command = command.normalize()?;
        let env = encode_environment(env.as_ref());
        debug!("executing>> {}", command.display());

        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .current_dir(&cwd)
            .env_clear()
            .envs(env)
            .kill_on_drop(true);

        if capture_output {
            cmd.stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        } else {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        }

        let mut child = cmd.spawn()?;
        let (registration, cancel_rx) = self.registry.register(child.id(), command.display());

        let collected = communicate(&mut child, stdin, cancel_rx, command.display()).await;
        registration.release();
        let collected = collected?;

        let response = Response {
            stdout: decode_lossy(&collected.stdout),
            stderr: decode_lossy(&collected.stderr),
            returncode: returncode_of(&collected.status),
        };

        let should_raise = raise_on_error && response.returncode != 0;
        let trace_enabled = tracing::enabled!(target: DIAGNOSTIC_TARGET, Level::TRACE);
        if !should_raise && !trace_enabled {
            return Ok(response);
        }

        let diagnostic = Diagnostic {
            command: command.display().to_string(),
            cwd,
            exit_code: response.returncode,
            stdout: response.stdout.clone(),
            stderr: response.stderr.clone(),
        };

        if should_raise {
            info!(target: DIAGNOSTIC_TARGET, "{diagnostic}");
            return Err(GatewayError::CalledProcess(Box::new(diagnostic)));
        }

        trace!(target: DIAGNOSTIC_TARGET, "{diagnostic}");
        Ok(response)
    }

    fn resolve_cwd(&self, cwd: Option<&Path>) -> Result<PathBuf> {
        let cwd = cwd.unwrap_or(self.config.default_cwd.as_path());
        Ok(std::path::absolute(cwd)?)
    }
}
