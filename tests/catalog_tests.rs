//! Integration tests for catalog registration semantics

use csvingest::catalog::{CatalogEntry, CatalogManager, MockCatalog, RegisterOutcome};
use csvingest::dataset::{Column, ColumnType};

fn students_entry() -> CatalogEntry {
    CatalogEntry {
        database: "glue_fallback_db".to_string(),
        table: "students_glue".to_string(),
        columns: vec![
            Column {
                name: "id".to_string(),
                column_type: ColumnType::Integer,
            },
            Column {
                name: "name".to_string(),
                column_type: ColumnType::Text,
            },
        ],
        location: "s3://my-bucket/".to_string(),
        delimiter: ",".to_string(),
    }
}

#[tokio::test]
async fn ensure_database_is_idempotent() {
    let catalog = MockCatalog::new();

    let first = catalog.ensure_database("glue_fallback_db").await.unwrap();
    let second = catalog.ensure_database("glue_fallback_db").await.unwrap();

    assert_eq!(first, RegisterOutcome::Created);
    assert_eq!(second, RegisterOutcome::AlreadyExists);
    assert!(catalog.has_database("glue_fallback_db"));
}

#[tokio::test]
async fn register_table_is_idempotent() {
    let catalog = MockCatalog::new();
    catalog.ensure_database("glue_fallback_db").await.unwrap();

    let entry = students_entry();
    let first = catalog.register_external_table(&entry).await.unwrap();
    let second = catalog.register_external_table(&entry).await.unwrap();

    assert_eq!(first, RegisterOutcome::Created);
    assert_eq!(second, RegisterOutcome::AlreadyExists);

    // The first registration wins; the entry is not overwritten.
    let stored = catalog
        .table("glue_fallback_db", "students_glue")
        .expect("entry should exist");
    assert_eq!(stored, entry);
}

#[tokio::test]
async fn access_denied_surfaces_as_error() {
    let catalog = MockCatalog::new();
    catalog.set_fail_access_denied(true);

    let err = catalog.ensure_database("glue_fallback_db").await.unwrap_err();
    assert!(err.to_string().contains("access denied"), "got: {}", err);

    let err = catalog
        .register_external_table(&students_entry())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("access denied"), "got: {}", err);
}
