use serde::{Deserialize, Serialize};

use novaflow_catalog::ModuleId;

use crate::navigation::{Mode, SidebarLabels};
use crate::resize::ResizeTarget;
use crate::tab::{ResourceSummary, Tab};
use crate::transient::ContextMenu;

/// 每次重繪時讀取的唯讀狀態。 / Read-only view of a session, queried on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    pub active_module_id: ModuleId,
    pub active_drawer_module_id: Option<ModuleId>,
    pub locked_drawer_module_id: Option<ModuleId>,
    pub is_drawer_visible: bool,
    pub explorer_module_id: ModuleId,
    pub mode: Mode,
    pub sidebar_width: i32,
    pub is_sidebar_expanded: bool,
    pub sidebar_labels: SidebarLabels,
    pub is_explorer_hidden: bool,
    pub drawer_height: i32,
    pub is_assistant_visible: bool,
    pub tabs: Vec<Tab>,
    pub active_tab_id: Option<String>,
    pub recently_closed: Vec<ResourceSummary>,
    pub pinned: Vec<ResourceSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_menu: Option<ContextMenu>,
    pub is_history_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resizing: Option<ResizeTarget>,
    pub revision: u64,
}

impl WorkspaceSnapshot {
    pub fn tab_ids(&self) -> Vec<&str> {
        self.tabs.iter().map(|tab| tab.id.as_str()).collect()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
