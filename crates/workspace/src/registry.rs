use crate::tab::{ResourceRef, ResourceSummary, Tab};

/// Transitions emitted by [`TabRegistry`] mutations.
/// 標籤集合變動時送出的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent {
    Opened(ResourceSummary),
    Activated(String),
    Closed(ResourceSummary),
}

/// 有序的標籤集合與啟用標籤。 / Ordered open tabs plus the active tab.
///
/// Ids are unique; opening an id that is already present only activates it.
/// Every mutator returns the events it produced so observers (recency,
/// renderers) can follow along without polling.
#[derive(Debug, Clone, Default)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
    active: Option<String>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 開啟或啟用標籤。 / Opens the reference if absent and makes it active.
    pub fn open(&mut self, reference: &ResourceRef) -> Vec<TabEvent> {
        let id = reference.id();
        if self.contains(&id) {
            self.active = Some(id.clone());
            tracing::debug!(tab_id = %id, "tab re-activated");
            return vec![TabEvent::Activated(id)];
        }

        let tab = reference.summary();
        tracing::debug!(tab_id = %tab.id, kind = ?tab.kind, "tab opened");
        self.tabs.push(tab.clone());
        self.active = Some(id);
        vec![TabEvent::Opened(tab)]
    }

    /// 關閉標籤。 / Closes the tab, picking the neighbour that slides into its slot.
    pub fn close(&mut self, id: &str) -> Vec<TabEvent> {
        let Some(idx) = self.position(id) else {
            tracing::debug!(tab_id = %id, "close ignored for unknown tab");
            return Vec::new();
        };

        let removed = self.tabs.remove(idx);
        if self.active.as_deref() == Some(id) {
            self.active = if self.tabs.is_empty() {
                None
            } else {
                let slot = idx.min(self.tabs.len() - 1);
                Some(self.tabs[slot].id.clone())
            };
        }
        tracing::debug!(tab_id = %id, active = ?self.active, "tab closed");
        vec![TabEvent::Closed(removed)]
    }

    /// Keeps only `id` and activates it.
    pub fn close_others(&mut self, id: &str) -> Vec<TabEvent> {
        if !self.contains(id) {
            return Vec::new();
        }
        let (kept, removed): (Vec<_>, Vec<_>) =
            self.tabs.drain(..).partition(|tab| tab.id == id);
        self.tabs = kept;
        self.active = Some(id.to_string());
        removed.into_iter().map(TabEvent::Closed).collect()
    }

    /// Keeps `id` and every tab before it, then activates `id`.
    pub fn close_to_right(&mut self, id: &str) -> Vec<TabEvent> {
        let Some(idx) = self.position(id) else {
            return Vec::new();
        };
        let removed: Vec<Tab> = self.tabs.drain(idx + 1..).collect();
        self.active = Some(id.to_string());
        removed.into_iter().map(TabEvent::Closed).collect()
    }

    /// 啟用既有標籤；不存在時忽略。 / Activates an open tab, ignoring unknown ids.
    pub fn activate(&mut self, id: &str) -> Vec<TabEvent> {
        if !self.contains(id) {
            return Vec::new();
        }
        self.active = Some(id.to_string());
        vec![TabEvent::Activated(id.to_string())]
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        let active = self.active.as_deref()?;
        self.tabs.iter().find(|tab| tab.id == active)
    }

    pub fn get(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novaflow_catalog::{ResourceKind, ResourceNode};

    fn node(id: &str) -> ResourceRef {
        ResourceRef::node(ResourceNode::leaf(id, id.to_uppercase(), ResourceKind::Page))
    }

    fn ids(registry: &TabRegistry) -> Vec<&str> {
        registry.tabs().iter().map(|tab| tab.id.as_str()).collect()
    }

    fn registry_with(names: &[&str]) -> TabRegistry {
        let mut registry = TabRegistry::new();
        for name in names {
            registry.open(&node(name));
        }
        registry
    }

    #[test]
    fn reopening_only_activates() {
        let mut registry = registry_with(&["a", "b"]);
        let events = registry.open(&node("a"));
        assert_eq!(events, vec![TabEvent::Activated("a".into())]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.active_id(), Some("a"));
    }

    #[test]
    fn closing_active_middle_tab_activates_the_tab_sliding_in() {
        let mut registry = registry_with(&["a", "b", "c", "d"]);
        registry.activate("b");
        registry.close("b");
        assert_eq!(ids(&registry), vec!["a", "c", "d"]);
        assert_eq!(registry.active_id(), Some("c"));
    }

    #[test]
    fn closing_active_last_tab_falls_back_to_new_last() {
        let mut registry = registry_with(&["a", "b", "c"]);
        registry.close("c");
        assert_eq!(registry.active_id(), Some("b"));
        registry.close("b");
        registry.close("a");
        assert_eq!(registry.active_id(), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn closing_inactive_tab_keeps_active() {
        let mut registry = registry_with(&["a", "b", "c"]);
        let events = registry.close("a");
        assert!(matches!(events.as_slice(), [TabEvent::Closed(tab)] if tab.id == "a"));
        assert_eq!(registry.active_id(), Some("c"));
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut registry = registry_with(&["a"]);
        assert!(registry.close("zzz").is_empty());
        assert!(registry.activate("zzz").is_empty());
        assert!(registry.close_others("zzz").is_empty());
        assert!(registry.close_to_right("zzz").is_empty());
        assert_eq!(ids(&registry), vec!["a"]);
        assert_eq!(registry.active_id(), Some("a"));
    }

    #[test]
    fn close_others_leaves_single_active_tab() {
        let mut registry = registry_with(&["a", "b", "c"]);
        let events = registry.close_others("b");
        assert_eq!(events.len(), 2);
        assert_eq!(ids(&registry), vec!["b"]);
        assert_eq!(registry.active_id(), Some("b"));
    }

    #[test]
    fn close_to_right_keeps_prefix_in_order() {
        let mut registry = registry_with(&["a", "b", "c", "d"]);
        registry.activate("d");
        let events = registry.close_to_right("b");
        assert_eq!(events.len(), 2);
        assert_eq!(ids(&registry), vec!["a", "b"]);
        assert_eq!(registry.active_id(), Some("b"));
    }
}
