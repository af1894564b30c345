// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;

use anyhow::Result;
use tracing::{Level, debug, info};

use crate::cli::{CliArgs, CliCommand, RunArgs};
use crate::config::{GatewayConfig, default_config_path, load_and_validate, load_or_default};
use crate::errors::GatewayError;
use crate::exec::{
    CleanEnvOptions, CommandLine, DIAGNOSTIC_TARGET, Gateway, ProcessRegistry, SubprocessCall,
};

pub use crate::exec::{Diagnostic, Environment};
pub use crate::types::Response;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the process registry and gateway
/// - Ctrl-C handling (terminates every registered child)
/// - running the requested command
///
/// Returns the exit code the binary should exit with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let config = load_config(&args)?;
    debug!(?config, "loaded gateway config");

    let registry = ProcessRegistry::new();
    let gateway = Gateway::new(config, registry.clone());

    // Ctrl-C → terminate whatever is running; the gateway reports the exit.
    {
        let registry = registry.clone();
        tokio::spawn(async move {
            loop {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    eprintln!("failed to listen for Ctrl+C: {e}");
                    return;
                }
                let signalled = registry.terminate_all();
                info!(signalled, "interrupt received; terminating active processes");
            }
        });
    }

    let result = match args.command {
        CliCommand::Run(run_args) => run_command(&gateway, run_args).await,
        CliCommand::Activate(act) => {
            gateway
                .run_in_prefix(&act.command, &act.prefix, act.cwd.as_deref(), None)
                .await
        }
    };

    match result {
        Ok(response) => {
            echo(&response);
            Ok(response.returncode)
        }
        Err(GatewayError::CalledProcess(diag)) => {
            if let Some(block) = unlogged_diagnostic(&diag) {
                eprint!("{block}");
            }
            Ok(diag.exit_code)
        }
        Err(e) => Err(e.into()),
    }
}

fn load_config(args: &CliArgs) -> Result<GatewayConfig> {
    let config = match args.config {
        Some(ref path) => load_and_validate(path)?,
        None => load_or_default(default_config_path())?,
    };
    Ok(config)
}

async fn run_command(gateway: &Gateway, args: RunArgs) -> errors::Result<Response> {
    let command = if args.shell_string {
        let joined = args
            .command
            .iter()
            .map(|w| w.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        CommandLine::Text(joined)
    } else {
        CommandLine::from(args.command)
    };

    let mut call = SubprocessCall::new(command)
        .raise_on_error(!args.no_raise)
        .capture_output(!args.no_capture);
    if let Some(cwd) = args.cwd {
        call = call.cwd(cwd);
    }
    if let Some(input) = args.stdin {
        call = call.stdin(input);
    }

    if args.clean_env {
        let options = CleanEnvOptions {
            clean_interpreter: !args.keep_interpreter_vars,
            clean_manager: !args.keep_manager_vars,
        };
        gateway.call_with_clean_env(call, options).await
    } else {
        gateway.call(call).await
    }
}

/// The diagnostic block for a raised failure, unless the execution core's
/// INFO log line already put it on stderr.
pub fn unlogged_diagnostic(diag: &Diagnostic) -> Option<String> {
    if tracing::enabled!(target: DIAGNOSTIC_TARGET, Level::INFO) {
        None
    } else {
        Some(diag.to_string())
    }
}

fn echo(response: &Response) {
    print!("{}", response.stdout);
    eprint!("{}", response.stderr);
}
