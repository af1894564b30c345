// src/exec/clean_env.rs

//! Running commands with interpreter / manager variables stripped.
//!
//! Variables like `PYTHONPATH` leaking from the host into a child that runs
//! a different interpreter are a classic source of breakage, so some callers
//! want them gone.

use crate::errors::Result;
use crate::exec::env::Environment;
use crate::exec::runner::{Gateway, SubprocessCall};
use crate::types::Response;

/// Interpreter-related variables removed by `clean_interpreter`.
pub const INTERPRETER_VARS: [&str; 2] = ["PYTHONPATH", "PYTHONHOME"];

/// Manager-related variables removed by `clean_manager`.
pub const MANAGER_VARS: [&str; 4] = [
    "CONDA_ROOT",
    "CONDA_PROMPT_MODIFIER",
    "CONDA_EXE",
    "CONDA_DEFAULT_ENV",
];

/// Which variable groups to strip. Both are on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanEnvOptions {
    pub clean_interpreter: bool,
    pub clean_manager: bool,
}

impl Default for CleanEnvOptions {
    fn default() -> Self {
        Self {
            clean_interpreter: true,
            clean_manager: true,
        }
    }
}

/// Return a copy of `env` with the selected variable groups removed.
pub fn sanitize_environment(env: &Environment, options: CleanEnvOptions) -> Environment {
    let mut clean = env.clone();

    if options.clean_interpreter {
        for key in INTERPRETER_VARS {
            clean.remove(key);
        }
    }
    if options.clean_manager {
        for key in MANAGER_VARS {
            clean.remove(key);
        }
    }

    clean
}

impl Gateway {
    /// [`Gateway::call`] with a sanitized copy of the ambient environment.
    ///
    /// Any environment already set on `call` is replaced, and output is
    /// always captured.
    pub async fn call_with_clean_env(
        &self,
        call: SubprocessCall,
        options: CleanEnvOptions,
    ) -> Result<Response> {
        let env = sanitize_environment(&Environment::from_ambient(), options);
        self.call(call.env(env).capture_output(true)).await
    }
}
