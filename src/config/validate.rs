// src/config/validate.rs

use std::path::Path;

use crate::config::model::{GatewayConfig, RawConfigFile, default_root_prefix};
use crate::errors::{GatewayError, Result};

impl TryFrom<RawConfigFile> for GatewayConfig {
    type Error = crate::errors::GatewayError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;

        let section = raw.gateway;
        let root_prefix = section.root_prefix.unwrap_or_else(default_root_prefix);
        let default_cwd = section.default_cwd.unwrap_or_else(|| root_prefix.clone());

        Ok(GatewayConfig {
            default_cwd,
            root_prefix,
            dev: section.dev,
            debug: section.debug,
            retain_temp_files: section.retain_temp_files,
        })
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    if let Some(ref root) = cfg.gateway.root_prefix {
        ensure_absolute("root_prefix", root)?;
    }
    if let Some(ref cwd) = cfg.gateway.default_cwd {
        ensure_absolute("default_cwd", cwd)?;
        ensure_not_a_file("default_cwd", cwd)?;
    }
    Ok(())
}

fn ensure_absolute(key: &str, path: &Path) -> Result<()> {
    if !path.is_absolute() {
        return Err(GatewayError::ConfigError(format!(
            "[gateway].{key} must be an absolute path (got {})",
            path.display()
        )));
    }
    Ok(())
}

// A directory that doesn't exist yet is allowed; spawning will report it.
fn ensure_not_a_file(key: &str, path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(GatewayError::ConfigError(format!(
            "[gateway].{key} is not a directory: {}",
            path.display()
        )));
    }
    Ok(())
}
