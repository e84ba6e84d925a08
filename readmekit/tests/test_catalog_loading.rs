use readmekit::{available, compose, Catalog, SectionCollection};
use std::path::PathBuf;

fn rust_crate_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("catalogs/rust-crate.toml")
}

/// Test that the shipped Rust crate catalog exists
#[test]
fn test_rust_crate_catalog_exists() {
    let path = rust_crate_catalog_path();

    assert!(path.exists(), "catalog should exist at {:?}", path);
}

/// Test that the shipped catalog loads and bootstraps a document
#[test]
fn test_rust_crate_catalog_loads() {
    let catalog = Catalog::load(rust_crate_catalog_path()).expect("catalog should load");

    let defaults: Vec<&str> = catalog
        .list_defaults()
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(defaults, vec!["title", "installation", "usage", "license"]);

    let collection = SectionCollection::bootstrap(&catalog);
    let document = compose(&collection);
    assert!(document.starts_with("# my-crate"));
    assert!(document.ends_with("at your option."));

    let addable: Vec<&str> = available(&collection, &catalog, "")
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(addable, vec!["features", "msrv"]);
}

/// Test that a missing catalog file is reported with its path
#[test]
fn test_missing_catalog_reports_path() {
    let err = Catalog::load("does/not/exist.toml").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.toml"));
}
