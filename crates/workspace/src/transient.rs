//! Transient overlays: the tab context menu and the change-history popover.
//!
//! Both close synchronously on any pointer press outside their bounds.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x.saturating_add(self.width)
            && y < self.y.saturating_add(self.height)
    }
}

/// Actions offered by the tab context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabMenuAction {
    Close,
    CloseOthers,
    CloseToRight,
    Pin,
}

/// Right-click menu attached to a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenu {
    pub x: i64,
    pub y: i64,
    pub target_tab_id: String,
    #[serde(skip)]
    size: (i64, i64),
}

impl ContextMenu {
    pub fn new(x: i64, y: i64, target_tab_id: impl Into<String>, size: (i32, i32)) -> Self {
        Self {
            x,
            y,
            target_tab_id: target_tab_id.into(),
            size: (i64::from(size.0), i64::from(size.1)),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size.0, self.size.1)
    }
}

/// A popover toggled by a button and dismissed by outside clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Popover {
    bounds: Option<Rect>,
}

impl Popover {
    pub fn is_open(&self) -> bool {
        self.bounds.is_some()
    }

    /// Opens at `bounds`, or closes when already open.
    pub fn toggle(&mut self, bounds: Rect) {
        self.bounds = match self.bounds {
            Some(_) => None,
            None => Some(bounds),
        };
    }

    pub fn close(&mut self) -> bool {
        self.bounds.take().is_some()
    }

    /// Closes when the press lands outside; returns `true` if it closed.
    pub fn dismiss_outside(&mut self, x: i64, y: i64) -> bool {
        match self.bounds {
            Some(bounds) if !bounds.contains(x, y) => self.close(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(10, 10, 5, 5);
        assert!(rect.contains(10, 10));
        assert!(rect.contains(14, 14));
        assert!(!rect.contains(15, 10));
        assert!(!rect.contains(9, 12));
    }

    #[test]
    fn popover_closes_only_on_outside_press() {
        let mut popover = Popover::default();
        popover.toggle(Rect::new(0, 0, 100, 100));
        assert!(!popover.dismiss_outside(50, 50));
        assert!(popover.is_open());
        assert!(popover.dismiss_outside(150, 50));
        assert!(!popover.is_open());
    }

    #[test]
    fn menu_bounds_follow_anchor_and_size() {
        let menu = ContextMenu::new(300, 40, "f1", (180, 96));
        assert!(menu.bounds().contains(479, 135));
        assert!(!menu.bounds().contains(480, 40));
    }
}
