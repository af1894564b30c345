// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Raw configuration as read from a TOML file.
///
/// ```toml
/// [gateway]
/// default_cwd = "/opt/host"
/// root_prefix = "/opt/host"
/// dev = false
/// debug = false
/// retain_temp_files = false
/// ```
///
/// All keys are optional. Use `GatewayConfig::try_from` to resolve defaults
/// and validate.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub gateway: RawGatewaySection,
}

/// `[gateway]` section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawGatewaySection {
    /// Working directory used when a call doesn't name one.
    ///
    /// If `None`, the resolved `root_prefix` is used.
    #[serde(default)]
    pub default_cwd: Option<PathBuf>,

    /// Root of the host installation; handed to the activation script
    /// wrapper. If `None`, derived from the running executable.
    #[serde(default)]
    pub root_prefix: Option<PathBuf>,

    #[serde(default)]
    pub dev: bool,

    #[serde(default)]
    pub debug: bool,

    /// Keep generated wrapper scripts instead of deleting them.
    #[serde(default)]
    pub retain_temp_files: bool,
}

/// Validated gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub default_cwd: PathBuf,
    pub root_prefix: PathBuf,
    pub dev: bool,
    pub debug: bool,
    pub retain_temp_files: bool,
}

impl GatewayConfig {
    /// Build a config without running validation. Mostly useful in tests.
    pub fn new_unchecked(default_cwd: PathBuf, root_prefix: PathBuf) -> Self {
        Self {
            default_cwd,
            root_prefix,
            dev: false,
            debug: false,
            retain_temp_files: false,
        }
    }
}

/// Install prefix of the running executable.
///
/// For `/opt/host/bin/procgate` that is `/opt/host`. Falls back to the
/// executable's directory, then to the current working directory.
pub fn default_root_prefix() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()));

    match exe_dir {
        Some(dir) if dir.file_name().is_some_and(|n| n == "bin") => dir
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or(dir),
        Some(dir) => dir,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
