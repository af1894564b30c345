// src/types.rs

use std::process::ExitStatus;

/// Result of a finished child process.
///
/// Produced exactly once per invocation. When output was not captured the
/// `stdout` / `stderr` fields are empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    pub stdout: String,
    pub stderr: String,
    pub returncode: i32,
}

impl Response {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, returncode: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            returncode,
        }
    }

    pub fn success(&self) -> bool {
        self.returncode == 0
    }
}

impl From<Response> for (String, String, i32) {
    fn from(r: Response) -> Self {
        (r.stdout, r.stderr, r.returncode)
    }
}

/// Numeric return code for an exit status.
///
/// On Unix a child killed by a signal reports `-signo`; when no code is
/// available at all we fall back to `-1`.
pub fn returncode_of(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return -sig;
        }
    }

    -1
}
