// src/exec/command.rs

//! Command normalization.
//!
//! Callers hand us a command as a single string, a path, or a list of
//! tokens. Everything is turned into an argument vector plus a display string
//! used for logs and diagnostics. Single strings and paths are tokenized with
//! shell rules (quotes, backslash escapes) via `shell-words`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::errors::{GatewayError, Result};

/// A command as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// Shell-style command string, e.g. `echo "hello world"`.
    Text(String),
    /// A single path; tokenized the same way as `Text`.
    Path(PathBuf),
    /// Already-split tokens, passed through as-is.
    Argv(Vec<OsString>),
}

/// Argument vector ready for spawning, plus how to show it to humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCommand {
    argv: Vec<OsString>,
    display: String,
}

impl NormalizedCommand {
    pub fn argv(&self) -> &[OsString] {
        &self.argv
    }

    pub fn program(&self) -> &OsString {
        // Non-empty is checked in `CommandLine::normalize`.
        &self.argv[0]
    }

    pub fn args(&self) -> &[OsString] {
        &self.argv[1..]
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

impl CommandLine {
    /// Normalize into an argument vector and display string.
    ///
    /// Fails with a config error when a string has unbalanced quotes or when
    /// the command turns out to be empty.
    pub fn normalize(&self) -> Result<NormalizedCommand> {
        let (argv, display) = match self {
            CommandLine::Text(s) => (split_words(s)?, s.clone()),
            CommandLine::Path(p) => {
                let display = p.to_string_lossy().into_owned();
                let argv = match p.to_str() {
                    Some(s) => split_words(s)?,
                    // Not valid UTF-8; can't tokenize, run it as one token.
                    None => vec![p.clone().into_os_string()],
                };
                (argv, display)
            }
            CommandLine::Argv(tokens) => {
                let display = tokens
                    .iter()
                    .map(|t| t.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" ");
                (tokens.clone(), display)
            }
        };

        if argv.is_empty() {
            return Err(GatewayError::ConfigError(format!(
                "empty command: {display:?}"
            )));
        }

        Ok(NormalizedCommand { argv, display })
    }
}

fn split_words(s: &str) -> Result<Vec<OsString>> {
    let words = shell_words::split(s).map_err(|e| {
        GatewayError::ConfigError(format!("could not tokenize command {s:?}: {e}"))
    })?;
    Ok(words.into_iter().map(OsString::from).collect())
}

impl From<&str> for CommandLine {
    fn from(s: &str) -> Self {
        CommandLine::Text(s.to_string())
    }
}

impl From<String> for CommandLine {
    fn from(s: String) -> Self {
        CommandLine::Text(s)
    }
}

impl From<&String> for CommandLine {
    fn from(s: &String) -> Self {
        CommandLine::Text(s.clone())
    }
}

impl From<&Path> for CommandLine {
    fn from(p: &Path) -> Self {
        CommandLine::Path(p.to_path_buf())
    }
}

impl From<PathBuf> for CommandLine {
    fn from(p: PathBuf) -> Self {
        CommandLine::Path(p)
    }
}

impl<T: Into<OsString>> From<Vec<T>> for CommandLine {
    fn from(tokens: Vec<T>) -> Self {
        CommandLine::Argv(tokens.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<OsString>, const N: usize> From<[T; N]> for CommandLine {
    fn from(tokens: [T; N]) -> Self {
        CommandLine::Argv(tokens.into_iter().map(Into::into).collect())
    }
}
