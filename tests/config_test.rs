//! Tests for layered settings loading from a local `.medus.toml`

use std::fs;

use tempfile::TempDir;

use medus::application::ApplicationError;
use medus::config::{local_config_path, Settings};
use medus::domain::SelectionMode;

fn write_local(dir: &TempDir, content: &str) {
    fs::write(local_config_path(dir.path()), content).expect("write local config");
}

#[test]
fn given_local_config_when_loading_then_overlays_defaults() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write_local(&temp, "mode = \"legacy\"\nascii = true\n");

    // Act
    let settings = Settings::load(Some(temp.path())).unwrap();

    // Assert
    assert_eq!(settings.mode, SelectionMode::Legacy);
    assert!(settings.ascii);
    assert_eq!(settings.prompt, "medus> ");
}

#[test]
fn given_relative_catalog_in_local_config_when_loading_then_resolves_against_dir() {
    let temp = TempDir::new().unwrap();
    write_local(&temp, "catalog = \"catalogs/main.toml\"\n");

    let settings = Settings::load(Some(temp.path())).unwrap();

    assert_eq!(
        settings.catalog,
        Some(temp.path().join("catalogs/main.toml"))
    );
}

#[test]
fn given_absolute_catalog_in_local_config_when_loading_then_kept_as_is() {
    let temp = TempDir::new().unwrap();
    let absolute = temp.path().join("elsewhere.json");
    write_local(&temp, &format!("catalog = {:?}\n", absolute.to_string_lossy()));

    let settings = Settings::load(Some(temp.path())).unwrap();

    assert_eq!(settings.catalog, Some(absolute));
}

#[test]
fn given_no_local_config_when_loading_then_uses_explicit_mode() {
    let temp = TempDir::new().unwrap();

    let settings = Settings::load(Some(temp.path())).unwrap();

    assert_eq!(settings.mode, SelectionMode::Explicit);
    assert!(settings.catalog.is_none());
}

#[test]
fn given_malformed_local_config_when_loading_then_reports_config_error() {
    let temp = TempDir::new().unwrap();
    write_local(&temp, "mode = [unterminated\n");

    let err = Settings::load(Some(temp.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains(".medus.toml"));
}

#[test]
fn given_unknown_mode_in_local_config_when_loading_then_reports_config_error() {
    let temp = TempDir::new().unwrap();
    write_local(&temp, "mode = \"strict\"\n");

    let err = Settings::load(Some(temp.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_template_written_as_local_config_when_loading_then_matches_defaults() {
    let temp = TempDir::new().unwrap();
    write_local(&temp, &Settings::template());

    let settings = Settings::load(Some(temp.path())).unwrap();

    assert_eq!(settings, Settings::default());
}
