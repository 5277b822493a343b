use serde::{Deserialize, Serialize};

use novaflow_catalog::{modules, ModuleId};

use crate::navigation::Mode;

/// Inclusive pixel range used by the resize state machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRange {
    pub min: i32,
    pub max: i32,
}

impl PixelRange {
    /// Builds a range, swapping the bounds if they arrive reversed.
    pub fn new(min: i32, max: i32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn clamp(self, value: i64) -> i32 {
        value.clamp(i64::from(self.min), i64::from(self.max)) as i32
    }

    pub fn contains(self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Runtime knobs of a workspace session.
///
/// Built from user preferences by the settings crate; [`Default`] mirrors the
/// stock shell layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub sidebar_width: PixelRange,
    pub sidebar_collapse_threshold: i32,
    pub sidebar_label_opaque_threshold: i32,
    pub sidebar_expanded_width: i32,
    pub sidebar_initial_width: i32,
    pub drawer_height: PixelRange,
    pub drawer_initial_height: i32,
    pub context_menu_size: (i32, i32),
    pub explorer_width: i32,
    pub developer_default_module: ModuleId,
    pub business_default_module: ModuleId,
    pub initial_drawer_module: Option<ModuleId>,
    pub initial_mode: Mode,
    pub recently_closed_capacity: usize,
    pub protected_tab_ids: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            sidebar_width: PixelRange::new(64, 320),
            sidebar_collapse_threshold: 120,
            sidebar_label_opaque_threshold: 160,
            sidebar_expanded_width: 200,
            sidebar_initial_width: 64,
            drawer_height: PixelRange::new(100, 800),
            drawer_initial_height: 320,
            context_menu_size: (180, 96),
            explorer_width: 240,
            developer_default_module: ModuleId::new(modules::PAGES),
            business_default_module: ModuleId::new(modules::FINANCE_CENTER),
            initial_drawer_module: Some(ModuleId::new(modules::RECENTS)),
            initial_mode: Mode::Developer,
            recently_closed_capacity: 10,
            protected_tab_ids: vec![crate::tab::ELEMENTS_VIEW_TAB_ID.to_string()],
        }
    }
}

impl WorkspaceConfig {
    pub fn default_module(&self, mode: Mode) -> &ModuleId {
        match mode {
            Mode::Developer => &self.developer_default_module,
            Mode::Business => &self.business_default_module,
        }
    }

    pub fn is_protected(&self, tab_id: &str) -> bool {
        self.protected_tab_ids.iter().any(|id| id == tab_id)
    }
}
