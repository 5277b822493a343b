use std::error::Error;
use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli() -> Result<Command, Box<dyn Error>> {
    Ok(Command::cargo_bin("novaflow-cli")?)
}

#[test]
fn modules_lists_demo_catalog() -> Result<(), Box<dyn Error>> {
    cli()?
        .arg("modules")
        .assert()
        .success()
        .stdout(predicate::str::contains("finance_center\tFinance center"))
        .stdout(predicate::str::contains("pages\tPage presentation"));
    Ok(())
}

#[test]
fn tree_search_keeps_ancestor_folder() -> Result<(), Box<dyn Error>> {
    cli()?
        .args(["tree", "v2", "--query", "CHART"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  V2 components/"))
        .stdout(predicate::str::contains("    Chart [chart] V2_1"))
        .stdout(predicate::str::contains("Approval flow").not());
    Ok(())
}

#[test]
fn tree_kind_facet_composes_with_query() -> Result<(), Box<dyn Error>> {
    cli()?
        .args(["tree", "finance_center", "--kind", "spreadsheet", "--query", "ledger"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Clearing ledger"))
        .stdout(predicate::str::contains("Pending tasks").not());
    Ok(())
}

#[test]
fn tree_unknown_module_fails() -> Result<(), Box<dyn Error>> {
    cli()?
        .args(["tree", "no-such-module"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-module"));
    Ok(())
}

#[test]
fn tree_reads_json_catalog() -> Result<(), Box<dyn Error>> {
    let temp = tempdir()?;
    let catalog = temp.path().join("catalog.json");
    fs::write(
        &catalog,
        r#"{ "modules": { "custom": [
            { "id": "c1", "name": "Custom page", "kind": "page", "code": "CUSTOM_PAGE" }
        ] } }"#,
    )?;

    cli()?
        .args(["--catalog", catalog.to_str().unwrap(), "tree", "custom", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"code\": \"CUSTOM_PAGE\""));
    Ok(())
}
