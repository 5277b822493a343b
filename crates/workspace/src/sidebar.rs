//! Sidebar entries for each mode.

use serde::{Deserialize, Serialize};

use novaflow_catalog::{module_label, modules, ModuleId};

use crate::navigation::Mode;
use crate::tab::BuiltinView;

/// 側邊欄項目被點擊時的動作。 / What clicking a sidebar entry does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum NavAction {
    /// Show the module's tree in the explorer.
    Module { module_id: ModuleId },
    /// Toggle the drawer on this module.
    Drawer { module_id: ModuleId },
    /// Open a shell-provided tab.
    BuiltinTab { view: BuiltinView },
    /// Handled outside the workspace (for example a redirect to space settings).
    Action { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavGroup {
    Workbench,
    QuickTools,
    System,
    Scenario,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub id: String,
    pub label: String,
    pub group: NavGroup,
    pub action: NavAction,
}

impl NavEntry {
    fn new(id: &str, group: NavGroup, action: NavAction) -> Self {
        Self {
            id: id.to_string(),
            label: module_label(id).to_string(),
            group,
            action,
        }
    }

    fn module(id: &str, group: NavGroup) -> Self {
        Self::new(
            id,
            group,
            NavAction::Module {
                module_id: ModuleId::new(id),
            },
        )
    }

    fn drawer(id: &str) -> Self {
        Self::new(
            id,
            NavGroup::QuickTools,
            NavAction::Drawer {
                module_id: ModuleId::new(id),
            },
        )
    }
}

/// Entries shown in the sidebar, in display order.
pub fn sidebar_entries(mode: Mode) -> Vec<NavEntry> {
    match mode {
        Mode::Developer => vec![
            NavEntry::module(modules::RECENT_FAV, NavGroup::Workbench),
            NavEntry::module(modules::RESOURCES, NavGroup::Workbench),
            NavEntry::drawer(modules::CONSOLE),
            NavEntry::drawer(modules::CONTEXT),
            NavEntry::new(
                modules::ELEMENTS,
                NavGroup::System,
                NavAction::BuiltinTab {
                    view: BuiltinView::ElementManagement,
                },
            ),
            NavEntry::new(
                modules::SETTINGS_REDIRECT,
                NavGroup::System,
                NavAction::Action {
                    name: modules::SETTINGS_REDIRECT.to_string(),
                },
            ),
        ],
        Mode::Business => vec![
            NavEntry::module(modules::FINANCE_CENTER, NavGroup::Scenario),
            NavEntry::module(modules::FINANCE_MASTER_DATA, NavGroup::Scenario),
            NavEntry::module(modules::CLOSING_MANAGEMENT, NavGroup::Scenario),
        ],
    }
}

/// Looks up the entry `id` among the entries of `mode`.
pub fn find_entry(mode: Mode, id: &str) -> Option<NavEntry> {
    sidebar_entries(mode).into_iter().find(|entry| entry.id == id)
}
