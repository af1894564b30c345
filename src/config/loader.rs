// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{GatewayConfig, RawConfigFile};
use crate::errors::Result;

/// Environment variable that, when present, keeps generated wrapper scripts.
pub const SAVE_TEMPS_ENV: &str = "PROCGATE_SAVE_TEMPS";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] for
/// defaults and validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path, resolve defaults and validate.
///
/// `PROCGATE_SAVE_TEMPS` in the environment switches on
/// `retain_temp_files` regardless of the file contents.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let raw = load_from_path(&path)?;
    finish(raw)
}

/// Like [`load_and_validate`], but a missing file yields the defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return finish(RawConfigFile::default());
    }
    load_and_validate(path)
}

fn finish(raw: RawConfigFile) -> Result<GatewayConfig> {
    let mut config = GatewayConfig::try_from(raw)?;
    if retain_temps_from_env() {
        config.retain_temp_files = true;
    }
    Ok(config)
}

/// Whether the save-temps override is present in the process environment.
pub fn retain_temps_from_env() -> bool {
    std::env::var_os(SAVE_TEMPS_ENV).is_some()
}

/// Default config path: `Procgate.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Procgate.toml")
}
