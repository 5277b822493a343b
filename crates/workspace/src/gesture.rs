//! Serializable form of every operation a renderer can invoke.
//!
//! Scripts of gestures are replayed by the CLI and by integration tests.

use serde::{Deserialize, Serialize};

use novaflow_catalog::{ModuleId, ResourceKind};

use crate::navigation::Mode;
use crate::resize::ResizeTarget;
use crate::tab::ResourceRef;
use crate::transient::{Rect, TabMenuAction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum Gesture {
    SelectModule {
        module_id: ModuleId,
    },
    ToggleDrawerModule {
        module_id: ModuleId,
    },
    CloseDrawer,
    SetMode {
        mode: Mode,
    },
    ClickNav {
        id: String,
    },
    OpenTab {
        item: ResourceRef,
    },
    CloseTab {
        id: String,
    },
    CloseOthers {
        id: String,
    },
    CloseToRight {
        id: String,
    },
    ActivateTab {
        id: String,
    },
    BeginResize {
        target: ResizeTarget,
    },
    PointerMove {
        x: i64,
        y: i64,
        #[serde(default)]
        viewport_height: i64,
    },
    EndResize {
        target: ResizeTarget,
    },
    SetSidebarWidth {
        px: i64,
    },
    SetDrawerHeight {
        px: i64,
    },
    ToggleSidebarExpand,
    ToggleExplorerCollapse,
    Pin {
        item: ResourceRef,
    },
    Unpin {
        id: String,
    },
    ShowContextMenu {
        x: i64,
        y: i64,
        tab_id: String,
    },
    DismissContextMenu,
    MenuAction {
        action: TabMenuAction,
    },
    PointerDown {
        x: i64,
        y: i64,
    },
    ToggleHistory {
        bounds: Rect,
    },
    ToggleFolder {
        id: String,
    },
    SetExplorerQuery {
        query: String,
    },
    ToggleExplorerKind {
        kind: ResourceKind,
    },
    ToggleFilterPanel,
    ToggleFilterKind {
        kind: ResourceKind,
    },
    SetFilterOwner {
        owner: String,
    },
    ResetFilter,
    ToggleAssistant,
    CloseAssistant,
    Teardown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gestures_parse_from_tagged_json() {
        let script = r#"[
            {"op": "set_mode", "mode": "business"},
            {"op": "open_tab", "item": {"source": "module", "module_id": "terminal"}},
            {"op": "pointer_move", "x": 10, "y": 20},
            {"op": "toggle_sidebar_expand"}
        ]"#;
        let gestures: Vec<Gesture> = serde_json::from_str(script).expect("script");
        assert_eq!(
            gestures[0],
            Gesture::SetMode {
                mode: Mode::Business
            }
        );
        assert_eq!(
            gestures[2],
            Gesture::PointerMove {
                x: 10,
                y: 20,
                viewport_height: 0
            }
        );
        assert_eq!(gestures[3], Gesture::ToggleSidebarExpand);
    }
}
