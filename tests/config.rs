#![cfg(unix)]

use std::io::Write;

use procgate::config::{load_and_validate, load_or_default, GatewayConfig, RawConfigFile};
use procgate::errors::GatewayError;
use tempfile::{NamedTempFile, TempDir};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_gateway_section_is_loaded() {
    let dir = TempDir::new().unwrap();
    let cwd = dir.path().join("work");
    let file = write_config(&format!(
        r#"
[gateway]
default_cwd = "{}"
root_prefix = "{}"
dev = true
debug = true
retain_temp_files = true
"#,
        cwd.display(),
        dir.path().display()
    ));

    let config = load_and_validate(file.path()).unwrap();

    assert_eq!(config.default_cwd, cwd);
    assert_eq!(config.root_prefix, dir.path());
    assert!(config.dev);
    assert!(config.debug);
    assert!(config.retain_temp_files);
}

#[test]
fn default_cwd_falls_back_to_root_prefix() {
    let dir = TempDir::new().unwrap();
    let file = write_config(&format!(
        "[gateway]\nroot_prefix = \"{}\"\n",
        dir.path().display()
    ));

    let config = load_and_validate(file.path()).unwrap();

    assert_eq!(config.default_cwd, dir.path());
    assert!(!config.dev);
}

#[test]
fn relative_paths_are_rejected() {
    let file = write_config("[gateway]\nroot_prefix = \"relative/prefix\"\n");

    match load_and_validate(file.path()) {
        Err(GatewayError::ConfigError(msg)) => {
            assert!(msg.contains("root_prefix"));
            assert!(msg.contains("absolute"));
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn default_cwd_pointing_at_a_file_is_rejected() {
    let not_a_dir = NamedTempFile::new().unwrap();
    let file = write_config(&format!(
        "[gateway]\ndefault_cwd = \"{}\"\n",
        not_a_dir.path().display()
    ));

    match load_and_validate(file.path()) {
        Err(GatewayError::ConfigError(msg)) => assert!(msg.contains("not a directory")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn unknown_keys_are_a_parse_error() {
    let file = write_config("[gateway]\ndefualt_cwd = \"/tmp\"\n");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(GatewayError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_error_unless_defaults_are_allowed() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("Procgate.toml");

    assert!(matches!(load_and_validate(&missing), Err(GatewayError::Io(_))));

    let config = load_or_default(&missing).unwrap();
    assert!(config.root_prefix.is_absolute() || config.root_prefix.as_os_str() == ".");
    assert_eq!(config.default_cwd, config.root_prefix);
}

#[test]
fn empty_file_uses_defaults() {
    let file = write_config("");

    let config = load_and_validate(file.path()).unwrap();
    let expected = GatewayConfig::try_from(RawConfigFile::default()).unwrap();

    assert_eq!(config.root_prefix, expected.root_prefix);
    assert_eq!(config.default_cwd, expected.default_cwd);
}
