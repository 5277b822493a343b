use std::collections::VecDeque;

use crate::registry::TabEvent;
use crate::tab::{ResourceRef, ResourceSummary};

/// 最近關閉與釘選清單。 / Recently closed history plus the pinned list.
///
/// The history is most-recent-first and bounded; protected tab ids never
/// enter it. Pins keep insertion order with the newest pin first.
#[derive(Debug, Clone)]
pub struct RecencyTracker {
    capacity: usize,
    protected: Vec<String>,
    recently_closed: VecDeque<ResourceSummary>,
    pinned: Vec<ResourceSummary>,
}

impl RecencyTracker {
    /// 建立指定容量的追蹤器。 / Creates a tracker with the given history capacity.
    pub fn new(capacity: usize, protected: Vec<String>) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            protected,
            recently_closed: VecDeque::with_capacity(capacity),
            pinned: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 調整容量並修剪超出的紀錄。 / Adjusts capacity and trims excess entries.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.recently_closed.truncate(self.capacity);
    }

    /// Applies one registry transition.
    pub fn observe(&mut self, event: &TabEvent) {
        match event {
            TabEvent::Closed(summary) => self.record_closed(summary.clone()),
            TabEvent::Opened(summary) => {
                self.forget(&summary.id);
            }
            TabEvent::Activated(id) => {
                self.forget(id);
            }
        }
    }

    pub fn observe_all<'a>(&mut self, events: impl IntoIterator<Item = &'a TabEvent>) {
        for event in events {
            self.observe(event);
        }
    }

    fn record_closed(&mut self, summary: ResourceSummary) {
        if self.protected.iter().any(|id| *id == summary.id) {
            return;
        }
        self.recently_closed.retain(|entry| entry.id != summary.id);
        self.recently_closed.push_front(summary);
        self.recently_closed.truncate(self.capacity);
    }

    /// 從最近關閉清單移除。 / Drops `id` from the history; returns `true` if it was there.
    pub fn forget(&mut self, id: &str) -> bool {
        let before = self.recently_closed.len();
        self.recently_closed.retain(|entry| entry.id != id);
        before != self.recently_closed.len()
    }

    /// 釘選項目；重複釘選不做任何事。 / Pins an item; re-pinning is a no-op.
    pub fn pin(&mut self, item: &ResourceRef) -> bool {
        self.pin_summary(item.summary())
    }

    /// Pins an already-normalised summary, such as an open tab.
    pub fn pin_summary(&mut self, summary: ResourceSummary) -> bool {
        if self.is_pinned(&summary.id) {
            return false;
        }
        self.pinned.insert(0, summary);
        true
    }

    /// 取消釘選。 / Unpins `id`; returns `false` when it was not pinned.
    pub fn unpin(&mut self, id: &str) -> bool {
        let before = self.pinned.len();
        self.pinned.retain(|entry| entry.id != id);
        before != self.pinned.len()
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.pinned.iter().any(|entry| entry.id == id)
    }

    pub fn recently_closed(&self) -> impl Iterator<Item = &ResourceSummary> {
        self.recently_closed.iter()
    }

    pub fn pinned(&self) -> &[ResourceSummary] {
        &self.pinned
    }

    pub fn clear_history(&mut self) {
        self.recently_closed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novaflow_catalog::{ResourceKind, ResourceNode};

    fn summary(id: &str) -> ResourceSummary {
        ResourceRef::node(ResourceNode::leaf(id, id, ResourceKind::Page)).summary()
    }

    fn closed_ids(tracker: &RecencyTracker) -> Vec<&str> {
        tracker.recently_closed().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn closing_promotes_and_limits_capacity() {
        let mut tracker = RecencyTracker::new(3, Vec::new());
        for id in ["a", "b", "c"] {
            tracker.observe(&TabEvent::Closed(summary(id)));
        }
        // Closing an id again moves it to the front instead of duplicating it.
        tracker.observe(&TabEvent::Closed(summary("a")));
        assert_eq!(closed_ids(&tracker), vec!["a", "c", "b"]);

        tracker.observe(&TabEvent::Closed(summary("d")));
        assert_eq!(closed_ids(&tracker), vec!["d", "a", "c"]);
    }

    #[test]
    fn protected_ids_never_enter_history() {
        let mut tracker = RecencyTracker::new(5, vec!["elements-view".into()]);
        tracker.observe(&TabEvent::Closed(summary("elements-view")));
        assert_eq!(tracker.recently_closed().count(), 0);
    }

    #[test]
    fn reopening_clears_stale_entry() {
        let mut tracker = RecencyTracker::new(5, Vec::new());
        tracker.observe(&TabEvent::Closed(summary("a")));
        tracker.observe(&TabEvent::Opened(summary("a")));
        assert_eq!(tracker.recently_closed().count(), 0);
    }

    #[test]
    fn pin_is_idempotent_and_unpin_tolerates_unknown_ids() {
        let mut tracker = RecencyTracker::new(5, Vec::new());
        let item = ResourceRef::node(ResourceNode::leaf("x", "X", ResourceKind::Model));
        assert!(tracker.pin(&item));
        assert!(!tracker.pin(&item));
        assert_eq!(tracker.pinned().len(), 1);
        assert!(!tracker.unpin("never"));
        assert_eq!(tracker.pinned().len(), 1);
        assert!(tracker.unpin("x"));
        assert!(tracker.pinned().is_empty());
    }

    #[test]
    fn set_capacity_trims_history() {
        let mut tracker = RecencyTracker::new(5, Vec::new());
        for id in ["a", "b", "c", "d"] {
            tracker.observe(&TabEvent::Closed(summary(id)));
        }
        tracker.set_capacity(2);
        assert_eq!(closed_ids(&tracker), vec!["d", "c"]);
    }
}
