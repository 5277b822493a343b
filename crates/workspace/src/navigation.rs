use serde::{Deserialize, Serialize};

use novaflow_catalog::ModuleId;

use crate::config::{PixelRange, WorkspaceConfig};

/// 介面模式。 / Developer shell versus the end-user business scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Developer,
    Business,
}

/// How much of the sidebar labels the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidebarLabels {
    Hidden,
    Fading,
    Visible,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SidebarMetrics {
    range: PixelRange,
    collapse_threshold: i32,
    opaque_threshold: i32,
    expanded_width: i32,
}

/// Selected module, drawer, mode and panel geometry of a session.
///
/// The drawer keeps its last non-null module ("locked") so a closing
/// animation can keep showing the old content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    active_module: ModuleId,
    drawer_module: Option<ModuleId>,
    locked_drawer_module: Option<ModuleId>,
    mode: Mode,
    sidebar_width: i32,
    explorer_hidden: bool,
    drawer_height: i32,
    assistant_visible: bool,
    sidebar: SidebarMetrics,
    drawer_range: PixelRange,
    developer_default: ModuleId,
    business_default: ModuleId,
}

impl NavigationState {
    pub fn new(config: &WorkspaceConfig) -> Self {
        let mode = config.initial_mode;
        let drawer_module = match mode {
            Mode::Developer => config.initial_drawer_module.clone(),
            Mode::Business => None,
        };
        Self {
            active_module: config.default_module(mode).clone(),
            locked_drawer_module: drawer_module.clone(),
            drawer_module,
            mode,
            sidebar_width: config
                .sidebar_width
                .clamp(i64::from(config.sidebar_initial_width)),
            explorer_hidden: false,
            drawer_height: config
                .drawer_height
                .clamp(i64::from(config.drawer_initial_height)),
            assistant_visible: false,
            sidebar: SidebarMetrics {
                range: config.sidebar_width,
                collapse_threshold: config.sidebar_collapse_threshold,
                opaque_threshold: config.sidebar_label_opaque_threshold,
                expanded_width: config.sidebar_width.clamp(i64::from(config.sidebar_expanded_width)),
            },
            drawer_range: config.drawer_height,
            developer_default: config.developer_default_module.clone(),
            business_default: config.business_default_module.clone(),
        }
    }

    /// 選擇模組並確保檔案總管可見。 / Selects a module and reveals the explorer.
    pub fn select_module(&mut self, id: ModuleId) -> bool {
        let changed = self.active_module != id || self.explorer_hidden;
        tracing::debug!(module = %id, "module selected");
        self.active_module = id;
        self.explorer_hidden = false;
        changed
    }

    /// Opens the drawer on `id`, or closes it when `id` is already shown.
    pub fn toggle_drawer_module(&mut self, id: ModuleId) {
        if self.drawer_module.as_ref() == Some(&id) {
            tracing::debug!(module = %id, "drawer closed");
            self.drawer_module = None;
        } else {
            tracing::debug!(module = %id, "drawer opened");
            self.locked_drawer_module = Some(id.clone());
            self.drawer_module = Some(id);
        }
    }

    pub fn close_drawer(&mut self) -> bool {
        self.drawer_module.take().is_some()
    }

    /// 切換模式。 / Switches mode, resetting module, drawer and explorer visibility.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        tracing::debug!(from = ?self.mode, to = ?mode, "mode switched");
        self.mode = mode;
        self.active_module = self.default_module(mode).clone();
        self.drawer_module = None;
        self.explorer_hidden = false;
        true
    }

    /// Sets the sidebar width, clamped into the configured range.
    pub fn set_sidebar_width(&mut self, px: i64) -> bool {
        let width = self.sidebar.range.clamp(px);
        if i64::from(width) != px {
            tracing::trace!(requested = px, applied = width, "sidebar width clamped");
        }
        let changed = width != self.sidebar_width;
        self.sidebar_width = width;
        changed
    }

    /// Binary expand/collapse toggle.
    pub fn toggle_sidebar_expand(&mut self) {
        let target = if self.is_sidebar_expanded() {
            self.sidebar.range.min
        } else {
            self.sidebar.expanded_width
        };
        self.sidebar_width = target;
    }

    pub fn set_drawer_height(&mut self, px: i64) -> bool {
        let height = self.drawer_range.clamp(px);
        let changed = height != self.drawer_height;
        self.drawer_height = height;
        changed
    }

    pub fn toggle_explorer_hidden(&mut self) {
        self.explorer_hidden = !self.explorer_hidden;
    }

    pub fn set_assistant_visible(&mut self, visible: bool) -> bool {
        let changed = self.assistant_visible != visible;
        self.assistant_visible = visible;
        changed
    }

    pub fn toggle_assistant(&mut self) {
        self.assistant_visible = !self.assistant_visible;
    }

    pub fn default_module(&self, mode: Mode) -> &ModuleId {
        match mode {
            Mode::Developer => &self.developer_default,
            Mode::Business => &self.business_default,
        }
    }

    pub fn active_module(&self) -> &ModuleId {
        &self.active_module
    }

    pub fn drawer_module(&self) -> Option<&ModuleId> {
        self.drawer_module.as_ref()
    }

    pub fn locked_drawer_module(&self) -> Option<&ModuleId> {
        self.locked_drawer_module.as_ref()
    }

    /// The element-context drawer only exists in developer mode.
    pub fn is_drawer_visible(&self) -> bool {
        self.mode == Mode::Developer && self.drawer_module.is_some()
    }

    /// Module whose tree the primary explorer shows.
    pub fn explorer_module(&self) -> &ModuleId {
        match self.mode {
            Mode::Developer => &self.active_module,
            Mode::Business => &self.business_default,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sidebar_width(&self) -> i32 {
        self.sidebar_width
    }

    pub fn sidebar_range(&self) -> PixelRange {
        self.sidebar.range
    }

    pub fn is_sidebar_expanded(&self) -> bool {
        self.sidebar_width > self.sidebar.collapse_threshold
    }

    pub fn sidebar_labels(&self) -> SidebarLabels {
        if self.sidebar_width <= self.sidebar.collapse_threshold {
            SidebarLabels::Hidden
        } else if self.sidebar_width <= self.sidebar.opaque_threshold {
            SidebarLabels::Fading
        } else {
            SidebarLabels::Visible
        }
    }

    pub fn is_explorer_hidden(&self) -> bool {
        self.explorer_hidden
    }

    pub fn drawer_height(&self) -> i32 {
        self.drawer_height
    }

    pub fn drawer_range(&self) -> PixelRange {
        self.drawer_range
    }

    pub fn is_assistant_visible(&self) -> bool {
        self.assistant_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> NavigationState {
        NavigationState::new(&WorkspaceConfig::default())
    }

    #[test]
    fn defaults_follow_config() {
        let nav = state();
        assert_eq!(nav.active_module(), &ModuleId::new("pages"));
        assert_eq!(nav.drawer_module(), Some(&ModuleId::new("recents")));
        assert_eq!(nav.sidebar_width(), 64);
        assert!(!nav.is_sidebar_expanded());
        assert_eq!(nav.sidebar_labels(), SidebarLabels::Hidden);
    }

    #[test]
    fn drawer_toggle_keeps_locked_module() {
        let mut nav = state();
        nav.toggle_drawer_module("console".into());
        assert_eq!(nav.drawer_module(), Some(&ModuleId::new("console")));
        nav.toggle_drawer_module("console".into());
        assert_eq!(nav.drawer_module(), None);
        assert_eq!(nav.locked_drawer_module(), Some(&ModuleId::new("console")));
    }

    #[test]
    fn selecting_a_module_reveals_the_explorer() {
        let mut nav = state();
        nav.toggle_explorer_hidden();
        assert!(nav.is_explorer_hidden());
        nav.select_module("logic".into());
        assert!(!nav.is_explorer_hidden());
        assert_eq!(nav.active_module(), &ModuleId::new("logic"));
    }

    #[test]
    fn sidebar_width_is_clamped_for_any_input() {
        let mut nav = state();
        for (input, expected) in [(-40, 64), (0, 64), (150, 150), (10_000, 320), (i64::MIN, 64)] {
            nav.set_sidebar_width(input);
            assert_eq!(nav.sidebar_width(), expected, "input {input}");
        }
    }

    #[test]
    fn expand_toggle_is_binary() {
        let mut nav = state();
        nav.toggle_sidebar_expand();
        assert_eq!(nav.sidebar_width(), 200);
        assert_eq!(nav.sidebar_labels(), SidebarLabels::Visible);
        nav.set_sidebar_width(300);
        nav.toggle_sidebar_expand();
        assert_eq!(nav.sidebar_width(), 64);
    }

    #[test]
    fn label_visibility_tracks_thresholds() {
        let mut nav = state();
        nav.set_sidebar_width(140);
        assert_eq!(nav.sidebar_labels(), SidebarLabels::Fading);
        nav.set_sidebar_width(161);
        assert_eq!(nav.sidebar_labels(), SidebarLabels::Visible);
    }

    #[test]
    fn mode_switch_resets_module_and_drawer() {
        let mut nav = state();
        nav.toggle_explorer_hidden();
        assert!(nav.set_mode(Mode::Business));
        assert_eq!(nav.active_module(), &ModuleId::new("finance_center"));
        assert_eq!(nav.drawer_module(), None);
        assert!(!nav.is_explorer_hidden());
        assert!(!nav.set_mode(Mode::Business));
    }
}
