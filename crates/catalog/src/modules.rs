//! Well-known navigation modules and their display labels.

pub const PAGES: &str = "pages";
pub const LOGIC: &str = "logic";
pub const DATA: &str = "data";
pub const LAKEHOUSE: &str = "lakehouse";
pub const INTEGRATION: &str = "integration";
pub const SERVICES: &str = "services";
pub const V2: &str = "v2";
pub const FINANCE: &str = "finance";
pub const RECENTS: &str = "recents";
pub const ELEMENTS: &str = "elements";
pub const TERMINAL: &str = "terminal";
pub const RECENT_FAV: &str = "recent_fav";
pub const RESOURCES: &str = "resources";
pub const CONSOLE: &str = "console";
pub const CONTEXT: &str = "context";
pub const FINANCE_CENTER: &str = "finance_center";
pub const FINANCE_MASTER_DATA: &str = "finance_master_data";
pub const CLOSING_MANAGEMENT: &str = "closing_management";
pub const SETTINGS_REDIRECT: &str = "settings-redirect";

const LABELS: &[(&str, &str)] = &[
    (PAGES, "Page presentation"),
    (LOGIC, "Process logic"),
    (DATA, "Data models"),
    (LAKEHOUSE, "Data lakehouse"),
    (INTEGRATION, "Data integration"),
    (SERVICES, "Platform services"),
    (V2, "V2 components"),
    (FINANCE, "Scenario: finance tools"),
    (RECENTS, "Recent & favourites"),
    (ELEMENTS, "Element management"),
    (TERMINAL, "System console"),
    (RECENT_FAV, "Recently opened"),
    (RESOURCES, "All resources"),
    (CONSOLE, "Console"),
    (CONTEXT, "Element info"),
    (FINANCE_CENTER, "Finance center"),
    (FINANCE_MASTER_DATA, "Finance master data"),
    (CLOSING_MANAGEMENT, "Period closing"),
    (SETTINGS_REDIRECT, "Space settings"),
];

/// Display label for a module id, falling back to the raw id.
pub fn module_label(id: &str) -> &str {
    LABELS
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, label)| *label)
        .unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_modules_fall_back_to_their_id() {
        assert_eq!(module_label(PAGES), "Page presentation");
        assert_eq!(module_label("custom"), "custom");
    }
}
