// src/config/mod.rs

//! Configuration loading and validation for procgate.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Resolve defaults and validate paths (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    SAVE_TEMPS_ENV, default_config_path, load_and_validate, load_from_path, load_or_default,
    retain_temps_from_env,
};
pub use model::{GatewayConfig, RawConfigFile, RawGatewaySection};
