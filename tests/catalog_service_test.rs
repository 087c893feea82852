//! Tests for CatalogService loading catalog documents from disk

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use medus::application::services::{CatalogFormat, CatalogService};
use medus::application::ApplicationError;
use medus::domain::{Catalog, CategoryId, DomainError};
use medus::infrastructure::traits::RealFileSystem;

fn create_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write catalog file");
    path
}

fn service() -> CatalogService {
    CatalogService::new(Arc::new(RealFileSystem))
}

#[test]
fn given_toml_catalog_when_loading_then_keeps_order_and_items() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_file(
        &temp,
        "catalog.toml",
        r#"
[[categories]]
id = 7
name = "Surgery"

[[categories.subcategories]]
name = "Trauma"
items = ["Burns", "Fractures"]

[[categories.subcategories]]
name = "Vascular"

[[categories]]
id = 3
name = "Pediatrics"
"#,
    );

    // Act
    let catalog = service().load(Some(&path)).unwrap();

    // Assert
    let names: Vec<_> = catalog.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Surgery", "Pediatrics"]);
    let surgery = catalog.get(CategoryId(7)).unwrap();
    assert_eq!(surgery.subcategories[0].items, vec!["Burns", "Fractures"]);
    assert!(surgery.subcategories[1].items.is_empty());
    assert!(catalog.get(CategoryId(3)).unwrap().subcategories.is_empty());
}

#[test]
fn given_json_catalog_when_loading_then_parses() {
    let temp = TempDir::new().unwrap();
    let path = create_file(
        &temp,
        "catalog.json",
        r#"{"categories":[{"id":1,"name":"Dermatology","subcategories":[{"name":"Skin","items":["Acne"]}]}]}"#,
    );

    let catalog = service().load_file(&path).unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.subcategory_count(), 1);
}

#[test]
fn given_no_path_when_loading_then_uses_builtin() {
    let catalog = service().load(None).unwrap();
    assert_eq!(catalog.len(), Catalog::builtin().len());
}

#[test]
fn given_unknown_extension_when_loading_then_reports_catalog_error() {
    let temp = TempDir::new().unwrap();
    let path = create_file(&temp, "catalog.yaml", "categories: []");

    let err = service().load_file(&path).unwrap_err();

    assert!(matches!(err, ApplicationError::Catalog { .. }));
}

#[test]
fn given_missing_file_when_loading_then_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.toml");

    let err = service().load_file(&path).unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn given_malformed_toml_when_loading_then_reports_catalog_error() {
    let temp = TempDir::new().unwrap();
    let path = create_file(&temp, "catalog.toml", "[[categories]]\nid = \"ten\"\n");

    let err = service().load_file(&path).unwrap_err();

    assert!(matches!(err, ApplicationError::Catalog { .. }));
}

#[test]
fn given_duplicate_names_when_loading_then_reports_domain_error() {
    let temp = TempDir::new().unwrap();
    let path = create_file(
        &temp,
        "catalog.toml",
        "[[categories]]\nid = 1\nname = \"A\"\n\n[[categories]]\nid = 2\nname = \"A\"\n",
    );

    let err = service().load_file(&path).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::DuplicateCategoryName(_))
    ));
}

#[test]
fn given_builtin_catalog_when_exported_as_toml_then_loads_back_identically() {
    let temp = TempDir::new().unwrap();
    let rendered = CatalogService::render(&Catalog::builtin(), CatalogFormat::Toml).unwrap();
    let path = create_file(&temp, "export.toml", &rendered);

    let loaded = service().load_file(&path).unwrap();

    assert_eq!(loaded.to_vec(), Catalog::builtin().to_vec());
}
