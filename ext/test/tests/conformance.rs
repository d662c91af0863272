//! Conformance tests that run YAML fixtures against catu
//!
//! Run with: cargo test -p catu-test --test conformance

#![cfg(feature = "fixtures")]

use catu_catalog::StandardCatalog;
use catu_test::fixture::Fixture;
use catu_test::fixtures_dir;
use std::fs;
use std::path::Path;

/// Load and run all fixtures in a directory
async fn run_fixtures_in_dir(dir: &Path) {
    if !dir.exists() {
        panic!("Fixtures directory does not exist: {}", dir.display());
    }

    let catalog = StandardCatalog::new();
    let mut paths: Vec<_> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|e| e == "yaml" || e == "yml"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "no fixtures in {}", dir.display());

    for path in paths {
        println!("Running fixture: {}", path.display());

        let yaml = fs::read_to_string(&path).expect("read yaml");

        // Parse potentially multiple fixtures (separated by ---)
        let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
            panic!("Failed to parse {}: {}", path.display(), e);
        });

        for fixture in fixtures {
            println!("  Running: {}", fixture.name);
            fixture.run_and_assert(&catalog).await;
        }
    }
}

#[tokio::test]
async fn test_components() {
    run_fixtures_in_dir(&fixtures_dir().join("01_components")).await;
}

#[tokio::test]
async fn test_match_types() {
    run_fixtures_in_dir(&fixtures_dir().join("02_match_types")).await;
}

#[tokio::test]
async fn test_semantics() {
    run_fixtures_in_dir(&fixtures_dir().join("03_semantics")).await;
}

#[tokio::test]
async fn test_errors() {
    run_fixtures_in_dir(&fixtures_dir().join("04_errors")).await;
}
