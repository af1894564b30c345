// src/logging.rs

//! Tracing setup for the `procgate` binary.
//!
//! `--log-level` wins over `PROCGATE_LOG`. The env var takes full
//! `EnvFilter` directives (`procgate=trace,warn`), so the diagnostic traced
//! for every non-raising call can be switched on for the gateway alone.
//! Output goes to stderr; stdout is reserved for the child's echoed output.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Env var holding filter directives for the binary.
pub const LOG_ENV: &str = "PROCGATE_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. A second call is an error.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = log_filter(cli_level, env_value.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

/// Filter for a CLI level and the raw value of [`LOG_ENV`].
///
/// Unparseable env directives fall back to `info` rather than failing
/// startup.
pub fn log_filter(cli_level: Option<LogLevel>, env_value: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(directive_for(level));
    }

    env_value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

fn directive_for(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
