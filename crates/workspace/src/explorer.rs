use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use novaflow_catalog::{
    modules, CatalogQuery, ModuleId, ResourceCatalog, ResourceKind, ResourceNode,
};

use crate::navigation::Mode;
use crate::recency::RecencyTracker;
use crate::tab::{ResourceSummary, Tab, TabKind, ELEMENTS_VIEW_TAB_ID};

const DEFAULT_EXPANDED: [&str; 3] = ["pages", "finance", "tasks"];

/// Title of the explorer while in business mode.
pub const BUSINESS_EXPLORER_TITLE: &str = "Reconciliation catalog";

/// 檔案總管的展開、搜尋與篩選狀態。 / Expansion, query and facet state of one explorer.
///
/// The state belongs to a (module, mode) pair and starts over whenever that
/// pair changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerState {
    source: (ModuleId, Mode),
    expanded: HashSet<String>,
    query: String,
    kinds: BTreeSet<ResourceKind>,
}

impl ExplorerState {
    pub fn new(module: ModuleId, mode: Mode) -> Self {
        Self {
            source: (module, mode),
            expanded: DEFAULT_EXPANDED.iter().map(|id| id.to_string()).collect(),
            query: String::new(),
            kinds: BTreeSet::new(),
        }
    }

    /// Starts over if the explorer now shows a different module or mode.
    pub fn follow(&mut self, module: &ModuleId, mode: Mode) -> bool {
        if self.source.0 == *module && self.source.1 == mode {
            return false;
        }
        *self = Self::new(module.clone(), mode);
        true
    }

    pub fn module(&self) -> &ModuleId {
        &self.source.0
    }

    pub fn toggle_folder(&mut self, id: &str) -> bool {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
            return true;
        }
        false
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn toggle_kind(&mut self, kind: ResourceKind) {
        if !self.kinds.remove(&kind) {
            self.kinds.insert(kind);
        }
    }

    pub fn kinds(&self) -> &BTreeSet<ResourceKind> {
        &self.kinds
    }

    pub fn catalog_query(&self) -> CatalogQuery {
        CatalogQuery::text(self.query.clone()).with_kinds(self.kinds.iter().copied())
    }

    /// Recents tree with this explorer's facets and query applied.
    pub fn recents(&self, recency: &RecencyTracker) -> Vec<ResourceNode> {
        CatalogQuery::text(self.query.clone()).apply(&faceted_recency_tree(recency, &self.kinds))
    }

    /// Tree to display, after facets and query.
    pub fn tree<C>(&self, catalog: &C) -> Vec<ResourceNode>
    where
        C: ResourceCatalog + ?Sized,
    {
        catalog.search_filtered(self.module(), &self.catalog_query())
    }
}

/// Header text of the primary explorer.
pub fn explorer_title(module: &ModuleId, mode: Mode) -> &str {
    match mode {
        Mode::Developer => modules::module_label(module.as_str()),
        Mode::Business => BUSINESS_EXPLORER_TITLE,
    }
}

/// Catalog-shaped node for a tab, pin or history entry.
pub fn summary_node(summary: &ResourceSummary) -> ResourceNode {
    let kind = match summary.kind {
        TabKind::Resource(kind) => kind,
        TabKind::Module => ResourceKind::Folder,
    };
    let mut node = ResourceNode::leaf(summary.id.clone(), summary.title.clone(), kind);
    if let Some(code) = &summary.code {
        node = node.with_code(code.clone());
    }
    if let Some(updated_at) = &summary.updated_at {
        node = node.with_updated_at(updated_at.clone());
    }
    node
}

/// Tree of the "recently opened" module, built from pins and history.
pub fn recency_tree(recency: &RecencyTracker) -> Vec<ResourceNode> {
    faceted_recency_tree(recency, &BTreeSet::new())
}

/// Like [`recency_tree`], keeping only resources whose kind is in `kinds`
/// when any are set. Module and built-in tabs have no resource kind and
/// always stay.
pub fn faceted_recency_tree(
    recency: &RecencyTracker,
    kinds: &BTreeSet<ResourceKind>,
) -> Vec<ResourceNode> {
    let keep = |summary: &ResourceSummary| match summary.kind {
        TabKind::Resource(kind) if !kind.is_folder() => {
            kinds.is_empty() || kinds.contains(&kind)
        }
        _ => true,
    };
    vec![
        ResourceNode::folder(
            "pinned",
            "Pinned",
            recency
                .pinned()
                .iter()
                .filter(|summary| keep(summary))
                .map(summary_node)
                .collect(),
        ),
        ResourceNode::folder(
            "recently_closed",
            "Recently closed",
            recency
                .recently_closed()
                .filter(|summary| keep(summary))
                .map(summary_node)
                .collect(),
        ),
    ]
}

/// Filter panel of the element list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementFilter {
    pub open: bool,
    pub kinds: BTreeSet<ResourceKind>,
    /// `None` means every owner.
    pub owner: Option<String>,
}

impl ElementFilter {
    pub fn toggle_panel(&mut self) {
        self.open = !self.open;
    }

    pub fn toggle_kind(&mut self, kind: ResourceKind) {
        if !self.kinds.remove(&kind) {
            self.kinds.insert(kind);
        }
    }

    /// Sets the owner filter; blank or "all" clears it.
    pub fn set_owner(&mut self, owner: &str) {
        let trimmed = owner.trim();
        self.owner = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn reset(&mut self) {
        self.kinds.clear();
        self.owner = None;
    }

    pub fn is_active(&self) -> bool {
        !self.kinds.is_empty() || self.owner.is_some()
    }

    pub fn apply<'a>(&self, items: &[&'a ResourceNode]) -> Vec<&'a ResourceNode> {
        items
            .iter()
            .copied()
            .filter(|node| self.kinds.is_empty() || self.kinds.contains(&node.kind))
            .filter(|node| match &self.owner {
                Some(owner) => node.created_by.eq_ignore_ascii_case(owner),
                None => true,
            })
            .collect()
    }
}

/// What the main content pane shows for the active tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "view")]
pub enum ContentView {
    Empty,
    ElementList,
    Console,
    Editor { title: String },
}

pub fn resolve_content(active: Option<&Tab>) -> ContentView {
    let Some(tab) = active else {
        return ContentView::Empty;
    };
    if tab.id == ELEMENTS_VIEW_TAB_ID {
        return ContentView::ElementList;
    }
    match tab.kind {
        TabKind::Module
            if tab.module_id.as_ref().map(ModuleId::as_str) == Some(modules::TERMINAL) =>
        {
            ContentView::Console
        }
        TabKind::Module => ContentView::ElementList,
        TabKind::Resource(_) => ContentView::Editor {
            title: tab.title.clone(),
        },
    }
}
