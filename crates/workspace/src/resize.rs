//! Drag-resize state machines and the global pointer capture they share.
//!
//! A drag acquires the capture on press and every pointer move is routed to
//! it, whatever lies under the pointer, until release. Only one capture can
//! be held at a time; acquiring a new one releases the previous holder.

use serde::{Deserialize, Serialize};

use crate::config::PixelRange;

/// Which panel edge is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeTarget {
    /// Sidebar width, measured from the window's left edge.
    Sidebar,
    /// Element-context drawer height, measured from the window's bottom edge.
    Drawer,
}

/// Pointer position in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i64,
    pub y: i64,
    /// Window height; needed for measurements taken from the bottom edge.
    #[serde(default)]
    pub viewport_height: i64,
}

impl PointerPosition {
    pub fn new(x: i64, y: i64, viewport_height: i64) -> Self {
        Self {
            x,
            y,
            viewport_height,
        }
    }
}

/// Resize state of one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeState {
    #[default]
    Idle,
    Resizing,
}

/// Reported to the renderer so it can (un)register its global pointer listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureChange {
    Acquired(ResizeTarget),
    Released(ResizeTarget),
}

/// One resizable edge bounded to `range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeResize {
    target: ResizeTarget,
    range: PixelRange,
    state: ResizeState,
}

impl EdgeResize {
    pub fn new(target: ResizeTarget, range: PixelRange) -> Self {
        Self {
            target,
            range,
            state: ResizeState::Idle,
        }
    }

    pub fn state(&self) -> ResizeState {
        self.state
    }

    pub fn target(&self) -> ResizeTarget {
        self.target
    }

    /// Size implied by a pointer position, clamped into range.
    pub fn measure(&self, pointer: PointerPosition) -> i32 {
        let raw = match self.target {
            ResizeTarget::Sidebar => pointer.x,
            ResizeTarget::Drawer => pointer.viewport_height.saturating_sub(pointer.y),
        };
        self.range.clamp(raw)
    }

    fn begin(&mut self) {
        self.state = ResizeState::Resizing;
    }

    fn end(&mut self) -> bool {
        std::mem::replace(&mut self.state, ResizeState::Idle) == ResizeState::Resizing
    }
}

/// Global pointer capture owned by the session.
#[derive(Debug, Clone)]
pub struct PointerCapture {
    sidebar: EdgeResize,
    drawer: EdgeResize,
    holder: Option<ResizeTarget>,
}

impl PointerCapture {
    pub fn new(sidebar: PixelRange, drawer: PixelRange) -> Self {
        Self {
            sidebar: EdgeResize::new(ResizeTarget::Sidebar, sidebar),
            drawer: EdgeResize::new(ResizeTarget::Drawer, drawer),
            holder: None,
        }
    }

    fn edge_mut(&mut self, target: ResizeTarget) -> &mut EdgeResize {
        match target {
            ResizeTarget::Sidebar => &mut self.sidebar,
            ResizeTarget::Drawer => &mut self.drawer,
        }
    }

    pub fn edge(&self, target: ResizeTarget) -> &EdgeResize {
        match target {
            ResizeTarget::Sidebar => &self.sidebar,
            ResizeTarget::Drawer => &self.drawer,
        }
    }

    /// Starts a drag on `target`, releasing any other holder first.
    pub fn acquire(&mut self, target: ResizeTarget) -> Vec<CaptureChange> {
        let mut changes = Vec::new();
        if self.holder == Some(target) {
            return changes;
        }
        if let Some(previous) = self.holder.take() {
            self.edge_mut(previous).end();
            changes.push(CaptureChange::Released(previous));
        }
        self.edge_mut(target).begin();
        self.holder = Some(target);
        tracing::debug!(?target, "pointer capture acquired");
        changes.push(CaptureChange::Acquired(target));
        changes
    }

    /// Size for the captured edge, or `None` when `target` does not hold the capture.
    pub fn route(&self, target: ResizeTarget, pointer: PointerPosition) -> Option<i32> {
        if self.holder != Some(target) {
            return None;
        }
        let size = self.edge(target).measure(pointer);
        tracing::trace!(?target, size, "pointer routed to resize");
        Some(size)
    }

    /// Routes a move to whichever edge holds the capture.
    pub fn route_any(&self, pointer: PointerPosition) -> Option<(ResizeTarget, i32)> {
        let target = self.holder?;
        self.route(target, pointer).map(|size| (target, size))
    }

    pub fn release(&mut self, target: ResizeTarget) -> Option<CaptureChange> {
        if self.holder != Some(target) {
            return None;
        }
        self.holder = None;
        self.edge_mut(target).end();
        tracing::debug!(?target, "pointer capture released");
        Some(CaptureChange::Released(target))
    }

    /// Drops whatever capture is held; used on teardown.
    pub fn release_all(&mut self) -> Option<CaptureChange> {
        let target = self.holder?;
        self.release(target)
    }

    pub fn holder(&self) -> Option<ResizeTarget> {
        self.holder
    }

    pub fn state(&self, target: ResizeTarget) -> ResizeState {
        self.edge(target).state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> PointerCapture {
        PointerCapture::new(PixelRange::new(64, 320), PixelRange::new(100, 800))
    }

    #[test]
    fn moves_are_ignored_without_capture() {
        let capture = capture();
        assert_eq!(capture.route(ResizeTarget::Sidebar, PointerPosition::new(200, 0, 0)), None);
        assert_eq!(capture.route_any(PointerPosition::default()), None);
    }

    #[test]
    fn sidebar_drag_measures_from_left_edge() {
        let mut capture = capture();
        capture.acquire(ResizeTarget::Sidebar);
        assert_eq!(capture.state(ResizeTarget::Sidebar), ResizeState::Resizing);
        let pointer = |x| PointerPosition::new(x, 500, 900);
        assert_eq!(capture.route(ResizeTarget::Sidebar, pointer(180)), Some(180));
        assert_eq!(capture.route(ResizeTarget::Sidebar, pointer(-10)), Some(64));
        assert_eq!(capture.route(ResizeTarget::Sidebar, pointer(9_999)), Some(320));
        assert_eq!(
            capture.release(ResizeTarget::Sidebar),
            Some(CaptureChange::Released(ResizeTarget::Sidebar))
        );
        assert_eq!(capture.state(ResizeTarget::Sidebar), ResizeState::Idle);
    }

    #[test]
    fn drawer_drag_measures_from_bottom_edge() {
        let mut capture = capture();
        capture.acquire(ResizeTarget::Drawer);
        assert_eq!(
            capture.route_any(PointerPosition::new(0, 600, 1000)),
            Some((ResizeTarget::Drawer, 400))
        );
        assert_eq!(
            capture.route_any(PointerPosition::new(0, 990, 1000)),
            Some((ResizeTarget::Drawer, 100))
        );
        assert_eq!(
            capture.route_any(PointerPosition::new(0, -500, 1000)),
            Some((ResizeTarget::Drawer, 800))
        );
    }

    #[test]
    fn acquiring_a_second_edge_releases_the_first() {
        let mut capture = capture();
        capture.acquire(ResizeTarget::Sidebar);
        let changes = capture.acquire(ResizeTarget::Drawer);
        assert_eq!(
            changes,
            vec![
                CaptureChange::Released(ResizeTarget::Sidebar),
                CaptureChange::Acquired(ResizeTarget::Drawer)
            ]
        );
        assert_eq!(capture.state(ResizeTarget::Sidebar), ResizeState::Idle);
        assert_eq!(capture.release(ResizeTarget::Sidebar), None);
        assert!(capture.release_all().is_some());
        assert_eq!(capture.holder(), None);
    }
}
