// src/exec/diagnostic.rs

use std::fmt;
use std::path::PathBuf;

/// Tracing target the execution core logs diagnostic blocks under.
pub const DIAGNOSTIC_TARGET: &str = "procgate::diagnostic";

/// Everything needed to explain a finished (usually failed) command.
///
/// Carried as structured fields on [`GatewayError::CalledProcess`]; the
/// `Display` impl renders the familiar block:
///
/// ```text
/// $ false
/// ==> cwd: /tmp <==
/// ==> exit code: 1 <==
/// ==> stdout <==
///
/// ==> stderr <==
///
/// ```
///
/// [`GatewayError::CalledProcess`]: crate::errors::GatewayError::CalledProcess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub command: String,
    pub cwd: PathBuf,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "$ {}", self.command)?;
        writeln!(f, "==> cwd: {} <==", self.cwd.display())?;
        writeln!(f, "==> exit code: {} <==", self.exit_code)?;
        writeln!(f, "==> stdout <==")?;
        writeln!(f, "{}", self.stdout)?;
        writeln!(f, "==> stderr <==")?;
        writeln!(f, "{}", self.stderr)
    }
}
