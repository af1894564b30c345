// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::exec::diagnostic::Diagnostic;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Spawn and wait failures from the OS, passed through untouched.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The child ran to completion with a nonzero exit code and the caller
    /// asked for that to be an error.
    #[error("{0}")]
    CalledProcess(Box<Diagnostic>),

    #[error("Script wrapper error: {0}")]
    Wrapper(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GatewayError {
    /// Exit code of the failed child, if this is a nonzero-exit error.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            GatewayError::CalledProcess(diag) => Some(diag.exit_code),
            _ => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            GatewayError::CalledProcess(diag) => Some(diag),
            _ => None,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, GatewayError>;
