//! The session object that owns all workspace state.
//!
//! Renderers hold one [`InteractionController`] per user session and mutate it
//! only through its operations; after each call they read a fresh
//! [`WorkspaceSnapshot`] and redraw when [`InteractionController::revision`]
//! moved.

use novaflow_catalog::{
    module_leaves, modules, ModuleId, ResourceCatalog, ResourceKind, ResourceNode,
};

use crate::config::WorkspaceConfig;
use crate::explorer::{
    explorer_title, resolve_content, ContentView, ElementFilter, ExplorerState,
};
use crate::gesture::Gesture;
use crate::navigation::{Mode, NavigationState};
use crate::recency::RecencyTracker;
use crate::registry::{TabEvent, TabRegistry};
use crate::resize::{CaptureChange, PointerCapture, PointerPosition, ResizeTarget};
use crate::sidebar::{find_entry, sidebar_entries, NavAction, NavEntry};
use crate::snapshot::WorkspaceSnapshot;
use crate::tab::{BuiltinView, ResourceRef};
use crate::transient::{ContextMenu, Popover, Rect, TabMenuAction};

/// 工作區工作階段。 / One user's workspace session.
#[derive(Debug, Clone)]
pub struct InteractionController {
    config: WorkspaceConfig,
    tabs: TabRegistry,
    navigation: NavigationState,
    recency: RecencyTracker,
    capture: PointerCapture,
    context_menu: Option<ContextMenu>,
    history: Popover,
    explorer: ExplorerState,
    element_filter: ElementFilter,
    revision: u64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(WorkspaceConfig::default())
    }
}

impl InteractionController {
    /// Starts a session with the element-management tab open and active.
    pub fn new(config: WorkspaceConfig) -> Self {
        let navigation = NavigationState::new(&config);
        let explorer = ExplorerState::new(navigation.explorer_module().clone(), navigation.mode());
        let mut tabs = TabRegistry::new();
        tabs.open(&ResourceRef::Builtin {
            view: BuiltinView::ElementManagement,
        });
        Self {
            tabs,
            recency: RecencyTracker::new(
                config.recently_closed_capacity,
                config.protected_tab_ids.clone(),
            ),
            capture: PointerCapture::new(config.sidebar_width, config.drawer_height),
            context_menu: None,
            history: Popover::default(),
            explorer,
            element_filter: ElementFilter::default(),
            revision: 0,
            navigation,
            config,
        }
    }

    fn touch(&mut self, changed: bool) -> bool {
        if changed {
            self.revision += 1;
        }
        changed
    }

    fn sync_explorer(&mut self) {
        let module = self.navigation.explorer_module().clone();
        self.explorer.follow(&module, self.navigation.mode());
    }

    fn forward(&mut self, events: Vec<TabEvent>) -> Vec<TabEvent> {
        self.recency.observe_all(&events);
        let target_closed = self.context_menu.as_ref().is_some_and(|menu| {
            events.iter().any(|event| {
                matches!(event, TabEvent::Closed(tab) if tab.id == menu.target_tab_id)
            })
        });
        if target_closed {
            self.context_menu = None;
        }
        self.touch(!events.is_empty());
        events
    }

    // Navigation.

    /// Selects a sidebar module. The element-management module opens its
    /// built-in tab instead of changing the active module.
    pub fn select_module(&mut self, id: impl Into<ModuleId>) -> bool {
        let id = id.into();
        if id == modules::ELEMENTS {
            return !self.open_builtin(BuiltinView::ElementManagement).is_empty();
        }
        let changed = self.navigation.select_module(id);
        self.sync_explorer();
        self.touch(changed)
    }

    pub fn toggle_drawer_module(&mut self, id: impl Into<ModuleId>) {
        self.navigation.toggle_drawer_module(id.into());
        self.touch(true);
    }

    pub fn close_drawer(&mut self) -> bool {
        let changed = self.navigation.close_drawer();
        self.touch(changed)
    }

    pub fn set_mode(&mut self, mode: Mode) -> bool {
        let changed = self.navigation.set_mode(mode);
        self.sync_explorer();
        self.touch(changed)
    }

    /// Runs the action behind sidebar entry `id` for the current mode.
    ///
    /// Returns the entry that was clicked; unknown ids do nothing.
    pub fn click_nav(&mut self, id: &str) -> Option<NavEntry> {
        let Some(entry) = find_entry(self.navigation.mode(), id) else {
            tracing::debug!(nav_id = %id, "click ignored for unknown sidebar entry");
            return None;
        };
        match &entry.action {
            NavAction::Module { module_id } => {
                self.select_module(module_id.clone());
            }
            NavAction::Drawer { module_id } => self.toggle_drawer_module(module_id.clone()),
            NavAction::BuiltinTab { view } => {
                self.open_builtin(*view);
            }
            NavAction::Action { name } => {
                tracing::debug!(action = %name, "external sidebar action requested");
            }
        }
        Some(entry)
    }

    pub fn toggle_explorer_collapse(&mut self) {
        self.navigation.toggle_explorer_hidden();
        self.touch(true);
    }

    pub fn toggle_sidebar_expand(&mut self) {
        self.navigation.toggle_sidebar_expand();
        self.touch(true);
    }

    pub fn set_sidebar_width(&mut self, px: i64) -> bool {
        let changed = self.navigation.set_sidebar_width(px);
        self.touch(changed)
    }

    pub fn set_drawer_height(&mut self, px: i64) -> bool {
        let changed = self.navigation.set_drawer_height(px);
        self.touch(changed)
    }

    pub fn toggle_assistant(&mut self) {
        self.navigation.toggle_assistant();
        self.touch(true);
    }

    /// Close signal from the assistant panel's own close button.
    pub fn close_assistant(&mut self) -> bool {
        let changed = self.navigation.set_assistant_visible(false);
        self.touch(changed)
    }

    // Tabs.

    pub fn open_tab(&mut self, item: &ResourceRef) -> Vec<TabEvent> {
        let events = self.tabs.open(item);
        self.forward(events)
    }

    fn open_builtin(&mut self, view: BuiltinView) -> Vec<TabEvent> {
        self.open_tab(&ResourceRef::Builtin { view })
    }

    pub fn close_tab(&mut self, id: &str) -> Vec<TabEvent> {
        let events = self.tabs.close(id);
        self.forward(events)
    }

    pub fn close_others(&mut self, id: &str) -> Vec<TabEvent> {
        let events = self.tabs.close_others(id);
        self.forward(events)
    }

    pub fn close_to_right(&mut self, id: &str) -> Vec<TabEvent> {
        let events = self.tabs.close_to_right(id);
        self.forward(events)
    }

    pub fn activate_tab(&mut self, id: &str) -> Vec<TabEvent> {
        let events = self.tabs.activate(id);
        self.forward(events)
    }

    // Pins.

    pub fn pin(&mut self, item: &ResourceRef) -> bool {
        let changed = self.recency.pin(item);
        self.touch(changed)
    }

    pub fn unpin(&mut self, id: &str) -> bool {
        let changed = self.recency.unpin(id);
        self.touch(changed)
    }

    // Drag resize.

    pub fn begin_resize(&mut self, target: ResizeTarget) -> Vec<CaptureChange> {
        let changes = self.capture.acquire(target);
        self.touch(!changes.is_empty());
        changes
    }

    /// Applies a pointer move to `target` if it holds the capture.
    pub fn update_resize(&mut self, target: ResizeTarget, pointer: PointerPosition) -> bool {
        let Some(size) = self.capture.route(target, pointer) else {
            return false;
        };
        self.apply_size(target, size)
    }

    /// Routes a global pointer move to whichever edge holds the capture.
    pub fn pointer_move(&mut self, pointer: PointerPosition) -> bool {
        let Some((target, size)) = self.capture.route_any(pointer) else {
            return false;
        };
        self.apply_size(target, size)
    }

    fn apply_size(&mut self, target: ResizeTarget, size: i32) -> bool {
        let changed = match target {
            ResizeTarget::Sidebar => self.navigation.set_sidebar_width(i64::from(size)),
            ResizeTarget::Drawer => self.navigation.set_drawer_height(i64::from(size)),
        };
        self.touch(changed)
    }

    pub fn end_resize(&mut self, target: ResizeTarget) -> Option<CaptureChange> {
        let change = self.capture.release(target);
        self.touch(change.is_some());
        change
    }

    pub fn begin_sidebar_resize(&mut self) -> Vec<CaptureChange> {
        self.begin_resize(ResizeTarget::Sidebar)
    }

    pub fn update_sidebar_resize(&mut self, pointer: PointerPosition) -> bool {
        self.update_resize(ResizeTarget::Sidebar, pointer)
    }

    pub fn end_sidebar_resize(&mut self) -> Option<CaptureChange> {
        self.end_resize(ResizeTarget::Sidebar)
    }

    pub fn begin_drawer_resize(&mut self) -> Vec<CaptureChange> {
        self.begin_resize(ResizeTarget::Drawer)
    }

    pub fn update_drawer_resize(&mut self, pointer: PointerPosition) -> bool {
        self.update_resize(ResizeTarget::Drawer, pointer)
    }

    pub fn end_drawer_resize(&mut self) -> Option<CaptureChange> {
        self.end_resize(ResizeTarget::Drawer)
    }

    /// Releases anything the session still holds. Call when the view goes away.
    pub fn teardown(&mut self) -> Option<CaptureChange> {
        let change = self.capture.release_all();
        let menu = self.context_menu.take().is_some();
        let popover = self.history.close();
        self.touch(change.is_some() || menu || popover);
        change
    }

    // Transient overlays.

    /// Opens the tab context menu; ignored for tabs that are not open.
    pub fn show_context_menu(&mut self, x: i64, y: i64, tab_id: &str) -> bool {
        if !self.tabs.contains(tab_id) {
            tracing::debug!(tab_id = %tab_id, "context menu ignored for unknown tab");
            return false;
        }
        self.context_menu = Some(ContextMenu::new(x, y, tab_id, self.config.context_menu_size));
        self.touch(true)
    }

    pub fn dismiss_context_menu(&mut self) -> bool {
        let changed = self.context_menu.take().is_some();
        self.touch(changed)
    }

    /// Runs a context-menu action on the menu's target tab, then closes the menu.
    pub fn apply_menu_action(&mut self, action: TabMenuAction) -> Vec<TabEvent> {
        let Some(menu) = self.context_menu.take() else {
            return Vec::new();
        };
        self.touch(true);
        let id = menu.target_tab_id.as_str();
        match action {
            TabMenuAction::Close => self.close_tab(id),
            TabMenuAction::CloseOthers => self.close_others(id),
            TabMenuAction::CloseToRight => self.close_to_right(id),
            TabMenuAction::Pin => {
                if let Some(tab) = self.tabs.get(id).cloned() {
                    let pinned = self.recency.pin_summary(tab);
                    self.touch(pinned);
                }
                Vec::new()
            }
        }
    }

    /// Any pointer press closes overlays it lands outside of.
    pub fn pointer_down(&mut self, x: i64, y: i64) -> bool {
        let menu = match &self.context_menu {
            Some(menu) if !menu.bounds().contains(x, y) => {
                self.context_menu = None;
                true
            }
            _ => false,
        };
        let popover = self.history.dismiss_outside(x, y);
        self.touch(menu || popover)
    }

    pub fn toggle_history(&mut self, bounds: Rect) {
        self.history.toggle(bounds);
        self.touch(true);
    }

    // Explorer and element list.

    pub fn toggle_folder(&mut self, id: &str) -> bool {
        let expanded = self.explorer.toggle_folder(id);
        self.touch(true);
        expanded
    }

    pub fn set_explorer_query(&mut self, query: impl Into<String>) {
        self.explorer.set_query(query);
        self.touch(true);
    }

    pub fn toggle_explorer_kind(&mut self, kind: ResourceKind) {
        self.explorer.toggle_kind(kind);
        self.touch(true);
    }

    pub fn toggle_filter_panel(&mut self) {
        self.element_filter.toggle_panel();
        self.touch(true);
    }

    pub fn toggle_filter_kind(&mut self, kind: ResourceKind) {
        self.element_filter.toggle_kind(kind);
        self.touch(true);
    }

    pub fn set_filter_owner(&mut self, owner: &str) {
        self.element_filter.set_owner(owner);
        self.touch(true);
    }

    pub fn reset_filter(&mut self) {
        self.element_filter.reset();
        self.touch(true);
    }

    /// Applies one serialized gesture.
    pub fn dispatch(&mut self, gesture: Gesture) {
        tracing::trace!(?gesture, "dispatch");
        match gesture {
            Gesture::SelectModule { module_id } => {
                self.select_module(module_id);
            }
            Gesture::ToggleDrawerModule { module_id } => self.toggle_drawer_module(module_id),
            Gesture::CloseDrawer => {
                self.close_drawer();
            }
            Gesture::SetMode { mode } => {
                self.set_mode(mode);
            }
            Gesture::ClickNav { id } => {
                self.click_nav(&id);
            }
            Gesture::OpenTab { item } => {
                self.open_tab(&item);
            }
            Gesture::CloseTab { id } => {
                self.close_tab(&id);
            }
            Gesture::CloseOthers { id } => {
                self.close_others(&id);
            }
            Gesture::CloseToRight { id } => {
                self.close_to_right(&id);
            }
            Gesture::ActivateTab { id } => {
                self.activate_tab(&id);
            }
            Gesture::BeginResize { target } => {
                self.begin_resize(target);
            }
            Gesture::PointerMove {
                x,
                y,
                viewport_height,
            } => {
                self.pointer_move(PointerPosition::new(x, y, viewport_height));
            }
            Gesture::EndResize { target } => {
                self.end_resize(target);
            }
            Gesture::SetSidebarWidth { px } => {
                self.set_sidebar_width(px);
            }
            Gesture::SetDrawerHeight { px } => {
                self.set_drawer_height(px);
            }
            Gesture::ToggleSidebarExpand => self.toggle_sidebar_expand(),
            Gesture::ToggleExplorerCollapse => self.toggle_explorer_collapse(),
            Gesture::Pin { item } => {
                self.pin(&item);
            }
            Gesture::Unpin { id } => {
                self.unpin(&id);
            }
            Gesture::ShowContextMenu { x, y, tab_id } => {
                self.show_context_menu(x, y, &tab_id);
            }
            Gesture::DismissContextMenu => {
                self.dismiss_context_menu();
            }
            Gesture::MenuAction { action } => {
                self.apply_menu_action(action);
            }
            Gesture::PointerDown { x, y } => {
                self.pointer_down(x, y);
            }
            Gesture::ToggleHistory { bounds } => self.toggle_history(bounds),
            Gesture::ToggleFolder { id } => {
                self.toggle_folder(&id);
            }
            Gesture::SetExplorerQuery { query } => self.set_explorer_query(query),
            Gesture::ToggleExplorerKind { kind } => self.toggle_explorer_kind(kind),
            Gesture::ToggleFilterPanel => self.toggle_filter_panel(),
            Gesture::ToggleFilterKind { kind } => self.toggle_filter_kind(kind),
            Gesture::SetFilterOwner { owner } => self.set_filter_owner(&owner),
            Gesture::ResetFilter => self.reset_filter(),
            Gesture::ToggleAssistant => self.toggle_assistant(),
            Gesture::CloseAssistant => {
                self.close_assistant();
            }
            Gesture::Teardown => {
                self.teardown();
            }
        }
    }

    pub fn dispatch_all(&mut self, gestures: impl IntoIterator<Item = Gesture>) {
        for gesture in gestures {
            self.dispatch(gesture);
        }
    }

    // Read side.

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        let nav = &self.navigation;
        WorkspaceSnapshot {
            active_module_id: nav.active_module().clone(),
            active_drawer_module_id: nav.drawer_module().cloned(),
            locked_drawer_module_id: nav.locked_drawer_module().cloned(),
            is_drawer_visible: nav.is_drawer_visible(),
            explorer_module_id: nav.explorer_module().clone(),
            mode: nav.mode(),
            sidebar_width: nav.sidebar_width(),
            is_sidebar_expanded: nav.is_sidebar_expanded(),
            sidebar_labels: nav.sidebar_labels(),
            is_explorer_hidden: nav.is_explorer_hidden(),
            drawer_height: nav.drawer_height(),
            is_assistant_visible: nav.is_assistant_visible(),
            tabs: self.tabs.tabs().to_vec(),
            active_tab_id: self.tabs.active_id().map(str::to_string),
            recently_closed: self.recency.recently_closed().cloned().collect(),
            pinned: self.recency.pinned().to_vec(),
            context_menu: self.context_menu.clone(),
            is_history_open: self.history.is_open(),
            resizing: self.capture.holder(),
            revision: self.revision,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn tabs(&self) -> &TabRegistry {
        &self.tabs
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn recency(&self) -> &RecencyTracker {
        &self.recency
    }

    pub fn explorer(&self) -> &ExplorerState {
        &self.explorer
    }

    pub fn element_filter(&self) -> &ElementFilter {
        &self.element_filter
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    pub fn sidebar_entries(&self) -> Vec<NavEntry> {
        sidebar_entries(self.navigation.mode())
    }

    pub fn explorer_title(&self) -> &str {
        explorer_title(self.navigation.explorer_module(), self.navigation.mode())
    }

    /// Tree shown by the primary explorer, with query and facets applied.
    pub fn explorer_tree<C>(&self, catalog: &C) -> Vec<ResourceNode>
    where
        C: ResourceCatalog + ?Sized,
    {
        if self.explorer.module() == modules::RECENT_FAV {
            return self.explorer.recents(&self.recency);
        }
        self.explorer.tree(catalog)
    }

    /// Catalog entry behind the active tab, shown by the element-info drawer.
    pub fn context_node<'a, C>(&self, catalog: &'a C) -> Option<&'a ResourceNode>
    where
        C: ResourceCatalog + ?Sized,
    {
        catalog.find(self.tabs.active_id()?)
    }

    /// Rows of the element list after the filter panel is applied.
    pub fn element_list<'a, C>(&self, catalog: &'a C) -> Vec<&'a ResourceNode>
    where
        C: ResourceCatalog + ?Sized,
    {
        let items = module_leaves(catalog, &ModuleId::new(modules::RESOURCES));
        self.element_filter.apply(&items)
    }

    pub fn content_view(&self) -> ContentView {
        resolve_content(self.tabs.active_tab())
    }
}
