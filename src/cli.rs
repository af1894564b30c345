// src/cli.rs

//! CLI argument parsing using `clap`.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `procgate`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "procgate",
    version,
    about = "Run child processes through a tracked, cancellable gateway.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Procgate.toml` in the current working directory; a missing
    /// default file is fine, a missing explicit one is an error.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PROCGATE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Run a command through the execution core.
    Run(RunArgs),

    /// Run a command inside an activated environment prefix.
    Activate(ActivateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Working directory (default: the configured default directory).
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Text to feed on the child's stdin.
    #[arg(long, value_name = "TEXT")]
    pub stdin: Option<String>,

    /// Return the child's exit code instead of failing on nonzero exit.
    #[arg(long)]
    pub no_raise: bool,

    /// Let the child write straight to this terminal.
    #[arg(long)]
    pub no_capture: bool,

    /// Strip interpreter and manager variables from the environment.
    #[arg(long)]
    pub clean_env: bool,

    /// With `--clean-env`, keep PYTHONPATH / PYTHONHOME.
    #[arg(long, requires = "clean_env")]
    pub keep_interpreter_vars: bool,

    /// With `--clean-env`, keep the CONDA_* manager variables.
    #[arg(long, requires = "clean_env")]
    pub keep_manager_vars: bool,

    /// Join the command words and tokenize them as one shell-style string.
    #[arg(long)]
    pub shell_string: bool,

    /// The command to run.
    #[arg(last = true, required = true, value_name = "CMD")]
    pub command: Vec<OsString>,
}

#[derive(Debug, Clone, Args)]
pub struct ActivateArgs {
    /// Environment prefix to activate.
    #[arg(long, value_name = "DIR")]
    pub prefix: PathBuf,

    /// Working directory (default: the prefix).
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// The command to run.
    #[arg(last = true, required = true, value_name = "CMD")]
    pub command: Vec<OsString>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
