//! Integration tests for Settings loading and their effect on generated bindings.
//!
//! Note: These tests run without a global config (temp files only),
//! so they effectively test local config merging with defaults.

use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use autocli::application::{decorate_with, Binding};
use autocli::{BaseType, CommandFn, DecorateError, Parameter, Settings, Signature, TypeHandlerRegistry};

#[test]
#[serial]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("autocli.toml");
    fs::write(&path, "internal_marker = \"x_\"\nshow_default = false\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.internal_marker, "x_");
    assert!(!settings.show_default);
}

#[test]
#[serial]
fn given_partial_local_config_when_load_then_unspecified_fields_keep_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("autocli.toml");
    fs::write(&path, "show_default = false\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.internal_marker, "_");
    assert!(!settings.show_default);
}

#[test]
#[serial]
fn given_missing_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let err = Settings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, DecorateError::Config { .. }));
}

#[test]
#[serial]
fn given_malformed_local_config_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("autocli.toml");
    fs::write(&path, "show_default = \"maybe\"\n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("autocli.toml"), "{}", err);
}

#[test]
#[serial]
fn given_empty_marker_in_config_when_load_then_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("autocli.toml");
    fs::write(&path, "internal_marker = \"\"\n").unwrap();

    assert!(matches!(
        Settings::load(Some(&path)),
        Err(DecorateError::Config { .. })
    ));
}

#[test]
#[serial]
fn given_loaded_settings_when_decorating_then_marker_and_show_default_apply() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("autocli.toml");
    fs::write(&path, "internal_marker = \"x_\"\nshow_default = false\n").unwrap();
    let settings = Settings::load(Some(&path)).unwrap();

    let sig = Signature::default()
        .param(Parameter::new("x_state"))
        .param(Parameter::new("visible_count").typed(BaseType::Int).default_value(1i64));
    let f = CommandFn::new("t", sig, |_| ());
    let bound = decorate_with(f.into(), &TypeHandlerRegistry::with_defaults(), &settings).unwrap();

    assert_eq!(bound.internal_parameters(), ["x_state".to_string()]);
    match bound.binding("visible_count") {
        Some(Binding::Option {
            long, show_default, ..
        }) => {
            assert_eq!(long, "visible-count");
            assert!(!show_default);
        }
        other => panic!("expected option, got {:?}", other),
    }
}

#[test]
#[serial]
fn given_autocli_env_vars_when_load_then_env_overrides_local_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("autocli.toml");
    fs::write(&path, "internal_marker = \"__\"\nshow_default = true\n").unwrap();

    std::env::set_var("AUTOCLI_SHOW_DEFAULT", "false");
    std::env::set_var("AUTOCLI_INTERNAL_MARKER", "x_");
    let loaded = Settings::load(Some(&path));
    std::env::remove_var("AUTOCLI_SHOW_DEFAULT");
    std::env::remove_var("AUTOCLI_INTERNAL_MARKER");

    let settings = loaded.expect("load settings");
    assert_eq!(settings.internal_marker, "x_");
    assert!(!settings.show_default);
}
