//! CLI commands driven end to end against an in-memory store

use catalog::config::{CatalogConfig, StorageBackend};
use catalog::tooling::{Cli, CliContext};
use catalog::types::NodeKind;
use catalog::CatalogError;
use clap::Parser;
use serde_json::Value;

fn context() -> CliContext {
    let mut config = CatalogConfig::default();
    config.storage.backend = StorageBackend::Memory;
    CliContext::new(config).unwrap()
}

fn run(context: &CliContext, args: &[&str]) -> Result<Value, CatalogError> {
    let argv = std::iter::once("catalog").chain(args.iter().copied());
    let cli = Cli::try_parse_from(argv).unwrap();
    let output = context.execute(&cli.command)?;
    Ok(serde_json::from_str(&output).unwrap())
}

#[test]
fn product_update_changes_only_given_fields() {
    let context = context();
    let before = run(&context, &["category", "get", "1.1"]).unwrap();
    let dell = &before["subCategories"][0]["childSubCategories"][1]["products"][0];
    let dell_id = dell["id"].as_str().unwrap().to_string();
    assert_eq!(dell["stock"], 3);

    let updated = run(
        &context,
        &["product", "update", "1.1", "1.1.1.2", dell_id.as_str(), "--stock", "5"],
    )
    .unwrap();
    assert_eq!(updated["stock"], 5);
    assert_eq!(updated["name"], "Dell 4512");
    assert_eq!(updated["numMaterial"], "AX-4342FD");

    let fetched = run(&context, &["product", "get", "1.1", dell_id.as_str()]).unwrap();
    assert_eq!(fetched, updated);
}

#[test]
fn subcategory_lifecycle() {
    let context = context();
    let added = run(
        &context,
        &[
            "subcategory",
            "add",
            "1.2",
            "vitaminas",
            "--id",
            "1.2.1.3",
            "--parent",
            "1.2.1",
            "--has-products",
        ],
    )
    .unwrap();
    assert_eq!(added["id"], "1.2.1.3");

    let node = run(&context, &["subcategory", "get", "1.2", "1.2.1.3"]).unwrap();
    assert_eq!(node["parentSubCategoryId"], "1.2.1");
    assert_eq!(node["products"], Value::Array(Vec::new()));
    assert_eq!(node["childSubCategories"], Value::Null);

    let product = run(
        &context,
        &["product", "add", "1.2", "1.2.1.3", "Vitamina C", "VT-001", "--stock", "7"],
    )
    .unwrap();
    let product_id = product["id"].as_str().unwrap().to_string();

    run(&context, &["subcategory", "delete", "1.2", "1.2.1.3"]).unwrap();
    let err = run(&context, &["product", "get", "1.2", product_id.as_str()]).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NotFound {
            kind: NodeKind::Product,
            ..
        }
    ));
}

#[test]
fn unknown_product_is_not_found() {
    let context = context();
    let err = run(
        &context,
        &["product", "update", "1.1", "1.1.1.2", "missing", "--name", "x"],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "product not found: missing");
}

#[test]
fn category_create_rename_delete() {
    let context = context();
    let created = run(&context, &["category", "create", "juguetes", "--id", "1.4"]).unwrap();
    assert_eq!(created["id"], "1.4");

    run(&context, &["category", "rename", "1.4", "juegos"]).unwrap();
    let listed = run(&context, &["category", "list"]).unwrap();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert!(names.contains(&"juegos"));
    assert_eq!(names.len(), 4);

    run(&context, &["category", "delete", "1.4"]).unwrap();
    let err = run(&context, &["category", "get", "1.4"]).unwrap_err();
    assert!(err.is_not_found());
}
