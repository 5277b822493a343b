use serde::{Deserialize, Serialize};

use novaflow_catalog::{modules, ModuleId};
use novaflow_workspace::{Mode, PixelRange, WorkspaceConfig, ELEMENTS_VIEW_TAB_ID};

const PREFERENCES_VERSION: u32 = 1;
const MAX_HISTORY_CAPACITY: usize = 100;

/// 外殼的使用者偏好設定。 / User-tunable shell settings, stored as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellPreferences {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub layout: LayoutPreferences,
    #[serde(default)]
    pub navigation: NavigationPreferences,
    #[serde(default)]
    pub history: HistoryPreferences,
}

fn default_version() -> u32 {
    PREFERENCES_VERSION
}

impl Default for ShellPreferences {
    fn default() -> Self {
        Self {
            version: PREFERENCES_VERSION,
            layout: LayoutPreferences::default(),
            navigation: NavigationPreferences::default(),
            history: HistoryPreferences::default(),
        }
    }
}

impl ShellPreferences {
    /// Repairs values a hand-edited file may have broken.
    pub fn sanitize(&mut self) {
        if self.version == 0 {
            self.version = PREFERENCES_VERSION;
        }
        self.layout.sanitize();
        self.navigation.sanitize();
        self.history.sanitize();
    }

    /// 轉換為工作區執行期設定。 / Builds the runtime config of a workspace session.
    pub fn to_workspace_config(&self) -> WorkspaceConfig {
        let layout = &self.layout;
        let nav = &self.navigation;
        WorkspaceConfig {
            sidebar_width: PixelRange::new(layout.sidebar_min_width, layout.sidebar_max_width),
            sidebar_collapse_threshold: layout.sidebar_collapse_threshold,
            sidebar_label_opaque_threshold: layout.sidebar_label_opaque_threshold,
            sidebar_expanded_width: layout.sidebar_expanded_width,
            sidebar_initial_width: layout.sidebar_initial_width,
            drawer_height: PixelRange::new(layout.drawer_min_height, layout.drawer_max_height),
            drawer_initial_height: layout.drawer_initial_height,
            context_menu_size: (layout.context_menu_width, layout.context_menu_height),
            explorer_width: layout.explorer_width,
            developer_default_module: ModuleId::new(nav.developer_default_module.as_str()),
            business_default_module: ModuleId::new(nav.business_default_module.as_str()),
            initial_drawer_module: nav
                .initial_drawer_module
                .as_deref()
                .filter(|id| !id.trim().is_empty())
                .map(ModuleId::new),
            initial_mode: nav.initial_mode,
            recently_closed_capacity: self.history.recently_closed_capacity,
            protected_tab_ids: self.history.protected_tab_ids.clone(),
        }
    }
}

/// Panel geometry, in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPreferences {
    pub sidebar_min_width: i32,
    pub sidebar_max_width: i32,
    pub sidebar_collapse_threshold: i32,
    pub sidebar_label_opaque_threshold: i32,
    pub sidebar_expanded_width: i32,
    pub sidebar_initial_width: i32,
    pub drawer_min_height: i32,
    pub drawer_max_height: i32,
    pub drawer_initial_height: i32,
    pub context_menu_width: i32,
    pub context_menu_height: i32,
    pub explorer_width: i32,
}

impl Default for LayoutPreferences {
    fn default() -> Self {
        Self {
            sidebar_min_width: 64,
            sidebar_max_width: 320,
            sidebar_collapse_threshold: 120,
            sidebar_label_opaque_threshold: 160,
            sidebar_expanded_width: 200,
            sidebar_initial_width: 64,
            drawer_min_height: 100,
            drawer_max_height: 800,
            drawer_initial_height: 320,
            context_menu_width: 180,
            context_menu_height: 96,
            explorer_width: 240,
        }
    }
}

fn sanitize_range(min: &mut i32, max: &mut i32, default_min: i32, default_max: i32) {
    if *min <= 0 || *max <= 0 {
        *min = default_min;
        *max = default_max;
    }
    if *min > *max {
        std::mem::swap(min, max);
    }
}

fn positive_or(value: &mut i32, default: i32) {
    if *value <= 0 {
        *value = default;
    }
}

impl LayoutPreferences {
    fn sanitize(&mut self) {
        let defaults = Self::default();
        sanitize_range(
            &mut self.sidebar_min_width,
            &mut self.sidebar_max_width,
            defaults.sidebar_min_width,
            defaults.sidebar_max_width,
        );
        sanitize_range(
            &mut self.drawer_min_height,
            &mut self.drawer_max_height,
            defaults.drawer_min_height,
            defaults.drawer_max_height,
        );

        let (min, max) = (self.sidebar_min_width, self.sidebar_max_width);
        // The expanded width has to sit above the collapse threshold.
        let threshold_max = if max > min { max - 1 } else { max };
        self.sidebar_collapse_threshold = self.sidebar_collapse_threshold.clamp(min, threshold_max);
        self.sidebar_label_opaque_threshold = self
            .sidebar_label_opaque_threshold
            .clamp(self.sidebar_collapse_threshold, max);
        let expanded_min = (self.sidebar_collapse_threshold + 1).min(max);
        self.sidebar_expanded_width = self.sidebar_expanded_width.clamp(expanded_min, max);
        self.sidebar_initial_width = self.sidebar_initial_width.clamp(min, max);
        self.drawer_initial_height = self
            .drawer_initial_height
            .clamp(self.drawer_min_height, self.drawer_max_height);

        positive_or(&mut self.context_menu_width, defaults.context_menu_width);
        positive_or(&mut self.context_menu_height, defaults.context_menu_height);
        positive_or(&mut self.explorer_width, defaults.explorer_width);
    }
}

/// Start-up modules and mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationPreferences {
    pub developer_default_module: String,
    pub business_default_module: String,
    /// `None` starts with the drawer closed.
    pub initial_drawer_module: Option<String>,
    pub initial_mode: Mode,
}

impl Default for NavigationPreferences {
    fn default() -> Self {
        Self {
            developer_default_module: modules::PAGES.to_string(),
            business_default_module: modules::FINANCE_CENTER.to_string(),
            initial_drawer_module: Some(modules::RECENTS.to_string()),
            initial_mode: Mode::Developer,
        }
    }
}

impl NavigationPreferences {
    fn sanitize(&mut self) {
        let defaults = Self::default();
        if self.developer_default_module.trim().is_empty() {
            self.developer_default_module = defaults.developer_default_module;
        }
        if self.business_default_module.trim().is_empty() {
            self.business_default_module = defaults.business_default_module;
        }
        if let Some(id) = &self.initial_drawer_module {
            if id.trim().is_empty() {
                self.initial_drawer_module = None;
            }
        }
    }
}

/// Recently-closed history settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryPreferences {
    pub recently_closed_capacity: usize,
    /// Tabs whose closing is never recorded.
    pub protected_tab_ids: Vec<String>,
}

impl Default for HistoryPreferences {
    fn default() -> Self {
        Self {
            recently_closed_capacity: 10,
            protected_tab_ids: vec![ELEMENTS_VIEW_TAB_ID.to_string()],
        }
    }
}

impl HistoryPreferences {
    fn sanitize(&mut self) {
        self.recently_closed_capacity = self
            .recently_closed_capacity
            .clamp(1, MAX_HISTORY_CAPACITY);
        self.protected_tab_ids.retain(|id| !id.trim().is_empty());
        self.protected_tab_ids.dedup();
    }
}
