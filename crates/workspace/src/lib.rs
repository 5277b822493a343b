//! Workspace state machine of the NovaFlow shell.
//!
//! Everything here is synchronous and total: operations on unknown ids are
//! no-ops, out-of-range sizes are clamped, and each mutation can be followed
//! by a [`WorkspaceSnapshot`] read.

pub mod config;
pub mod controller;
pub mod explorer;
pub mod gesture;
pub mod navigation;
pub mod recency;
pub mod registry;
pub mod resize;
pub mod sidebar;
pub mod snapshot;
pub mod tab;
pub mod transient;

pub use config::{PixelRange, WorkspaceConfig};
pub use controller::InteractionController;
pub use explorer::{
    explorer_title, faceted_recency_tree, recency_tree, resolve_content, ContentView,
    ElementFilter, ExplorerState,
};
pub use gesture::Gesture;
pub use navigation::{Mode, NavigationState, SidebarLabels};
pub use recency::RecencyTracker;
pub use registry::{TabEvent, TabRegistry};
pub use resize::{CaptureChange, PointerCapture, PointerPosition, ResizeState, ResizeTarget};
pub use sidebar::{sidebar_entries, NavAction, NavEntry, NavGroup};
pub use snapshot::WorkspaceSnapshot;
pub use tab::{
    BuiltinView, ResourceRef, ResourceSummary, Tab, TabKind, ELEMENTS_VIEW_TAB_ID,
    MODULE_TAB_PREFIX,
};
pub use transient::{ContextMenu, Popover, Rect, TabMenuAction};
