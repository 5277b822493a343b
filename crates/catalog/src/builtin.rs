//! Demo catalog shipped with the shell so it can run without a backend.

use once_cell::sync::Lazy;

use crate::catalog::{CatalogError, StaticCatalog};
use crate::modules;
use crate::node::{ModuleId, ResourceKind, ResourceNode};

/// Builds a category folder whose leaves get `<category>-<index>` ids.
fn category(id: &str, name: &str, items: &[(&str, ResourceKind)]) -> ResourceNode {
    let children = items
        .iter()
        .enumerate()
        .map(|(idx, (item, kind))| {
            ResourceNode::leaf(format!("{id}-{idx}"), *item, *kind)
                .with_code(format!("{}_{idx}", id.trim_end_matches("_cat").to_uppercase()))
                .with_version("1.0")
                .with_owner("Admin")
                .with_updated_at("2025-05-01")
        })
        .collect();
    ResourceNode::folder(id, name, children).with_code(id.to_uppercase())
}

static DEMO_MODULES: Lazy<Vec<(&'static str, Vec<ResourceNode>)>> = Lazy::new(|| {
    use ResourceKind::*;

    vec![
        (
            modules::PAGES,
            vec![category(
                "pages_cat",
                "Page presentation",
                &[("Spreadsheet", Spreadsheet), ("UX designer", Ux)],
            )],
        ),
        (
            modules::LOGIC,
            vec![category(
                "logic_cat",
                "Process logic",
                &[("Workflow", Workflow), ("Python script", Script)],
            )],
        ),
        (
            modules::DATA,
            vec![category(
                "data_cat",
                "Data models",
                &[
                    ("Financial model", Model),
                    ("Dimension definitions", Model),
                    ("Domain model", Model),
                ],
            )],
        ),
        (
            modules::LAKEHOUSE,
            vec![category(
                "lakehouse_cat",
                "Data lakehouse",
                &[("Relational database", Db)],
            )],
        ),
        (
            modules::INTEGRATION,
            vec![category(
                "integration_cat",
                "Data integration",
                &[("Data stream", Stream), ("Connector", Connector)],
            )],
        ),
        (
            modules::SERVICES,
            vec![category(
                "services_cat",
                "Platform services",
                &[
                    ("Menu configuration", Component),
                    ("Global variables", Component),
                    ("Permission schemes", Component),
                    ("Value lists", Component),
                ],
            )],
        ),
        (
            modules::V2,
            vec![category(
                "v2_cat",
                "V2 components",
                &[
                    ("Page", Page),
                    ("Chart", Chart),
                    ("List table", Spreadsheet),
                    ("Approval flow", Workflow),
                    ("Business model", Model),
                ],
            )],
        ),
        (
            modules::FINANCE,
            vec![category(
                "finance_cat",
                "Scenario: finance tools",
                &[("Accounting engine", Accounting)],
            )],
        ),
        (
            modules::RECENTS,
            vec![category(
                "recents_cat",
                "Recently opened",
                &[
                    ("Reconciliation model v2", Model),
                    ("Clearing ledger page", Page),
                ],
            )],
        ),
        (
            modules::ELEMENTS,
            vec![category(
                "elements_cat",
                "Element management",
                &[
                    ("Shared component library", Component),
                    ("Private components", Component),
                ],
            )],
        ),
        (
            modules::TERMINAL,
            vec![category(
                "terminal_cat",
                "System console",
                &[("Console log", Script)],
            )],
        ),
        (
            modules::CONSOLE,
            vec![category(
                "console_cat",
                "Console",
                &[("Pipeline status", Stream), ("Cluster log", Script)],
            )],
        ),
        (
            modules::FINANCE_CENTER,
            vec![
                category(
                    "tasks",
                    "Reconciliation tasks",
                    &[
                        ("Pending tasks", Workflow),
                        ("Progress tracking", Chart),
                        ("Exception handling", Workflow),
                    ],
                ),
                category(
                    "clearing",
                    "Clearing center",
                    &[("Clearing ledger", Spreadsheet), ("Auto-clearing rules", Logic)],
                ),
                category(
                    "reports",
                    "Variance reports",
                    &[("Monthly clearing summary", Chart), ("Reconciliation board", Page)],
                ),
                category(
                    "config",
                    "Matching rules",
                    &[("Matching algorithms", Logic), ("Approval chains", Workflow)],
                ),
            ],
        ),
        (
            modules::RESOURCES,
            vec![
                ResourceNode::leaf("f1", "0101 Daily reconciliation job", Workflow)
                    .with_code("RECON_DAILY")
                    .with_description("Pulls ERP ledgers every day and matches them")
                    .with_version("v2.1")
                    .with_owner("liuqing")
                    .with_updated_at("2025-05-14 10:28:07")
                    .with_tags(["Finance", "Batch"]),
                ResourceNode::leaf("f2", "Financial statement connector", Connector)
                    .with_code("FIN_REPORT_CONN")
                    .with_description("Core connector for the financial statement data flow")
                    .with_version("v1.0.2")
                    .with_owner("liuqing")
                    .with_updated_at("2025-05-14 17:28:09"),
                ResourceNode::leaf("f3", "Reconciliation model - core logic", Model)
                    .with_code("RECON_CORE")
                    .with_description("Core clearing and reconciliation business model")
                    .with_version("3.0")
                    .with_owner("liuqing")
                    .with_updated_at("2025-05-23 10:38:41"),
            ],
        ),
    ]
});

/// Catalog with one tree per well-known module.
pub fn demo_catalog() -> Result<StaticCatalog, CatalogError> {
    StaticCatalog::from_modules(
        DEMO_MODULES
            .iter()
            .map(|(module, nodes)| (ModuleId::new(*module), nodes.clone())),
    )
}
