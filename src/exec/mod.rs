// src/exec/mod.rs

//! Process execution layer.
//!
//! Every child process the host application starts goes through the
//! [`Gateway`] defined here.
//!
//! - [`env`] turns environment mappings into spawn-ready pairs.
//! - [`command`] normalizes strings, paths and token lists into an argv.
//! - [`registry`] tracks in-flight children so an interrupt handler can
//!   terminate them.
//! - [`runner`] is the execution core (`Gateway::call`).
//! - [`clean_env`] runs commands with interpreter/manager variables stripped.
//! - [`activation`] runs commands inside an activated environment prefix.
//! - [`diagnostic`] holds the structured failure report.
//! - [`output`] drains child pipes and decodes them.

pub mod activation;
pub mod clean_env;
pub mod command;
pub mod diagnostic;
pub mod env;
pub mod output;
pub mod registry;
pub mod runner;

pub use activation::{ScriptCleanup, ScriptWrapper, WrapRequest, WrappedCommand};
pub use clean_env::{CleanEnvOptions, sanitize_environment};
pub use command::{CommandLine, NormalizedCommand};
pub use diagnostic::{DIAGNOSTIC_TARGET, Diagnostic};
pub use env::{Environment, encode_environment};
pub use output::decode_lossy;
pub use registry::{ActiveProcess, ProcessId, ProcessRegistry, Registration};
pub use runner::{Gateway, SubprocessCall};
