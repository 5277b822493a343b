use serde::{Deserialize, Serialize};

use novaflow_catalog::{module_label, modules, ModuleId, ResourceKind, ResourceNode};

/// Id of the built-in element-management tab.
pub const ELEMENTS_VIEW_TAB_ID: &str = "elements-view";

/// Prefix of tabs that stand for a whole navigation module.
pub const MODULE_TAB_PREFIX: &str = "module-";

/// 標籤所代表的內容類型。 / What kind of content a tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "kind")]
pub enum TabKind {
    Resource(ResourceKind),
    Module,
}

/// Views that ship with the shell rather than coming from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinView {
    ElementManagement,
}

impl BuiltinView {
    pub fn tab_id(self) -> &'static str {
        match self {
            BuiltinView::ElementManagement => ELEMENTS_VIEW_TAB_ID,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            BuiltinView::ElementManagement => module_label(modules::ELEMENTS),
        }
    }
}

/// Everything a user can ask the workspace to open.
/// 可開啟為標籤的來源。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source")]
pub enum ResourceRef {
    /// A catalog entry picked from an explorer or list.
    Node { node: ResourceNode },
    /// A whole navigation module opened as a tab.
    Module { module_id: ModuleId },
    /// An entry of the console drawer.
    Console { id: String, title: String },
    /// A shell-provided view.
    Builtin { view: BuiltinView },
}

impl ResourceRef {
    pub fn node(node: ResourceNode) -> Self {
        ResourceRef::Node { node }
    }

    pub fn module(module_id: impl Into<ModuleId>) -> Self {
        ResourceRef::Module {
            module_id: module_id.into(),
        }
    }

    pub fn id(&self) -> String {
        match self {
            ResourceRef::Node { node } => node.id.clone(),
            ResourceRef::Module { module_id } => format!("{MODULE_TAB_PREFIX}{module_id}"),
            ResourceRef::Console { id, .. } => id.clone(),
            ResourceRef::Builtin { view } => view.tab_id().to_string(),
        }
    }

    /// Normalised summary shared by tabs, pins and history entries.
    pub fn summary(&self) -> ResourceSummary {
        match self {
            ResourceRef::Node { node } => ResourceSummary {
                id: node.id.clone(),
                title: node.name.clone(),
                code: (!node.code.is_empty()).then(|| node.code.clone()),
                kind: TabKind::Resource(node.kind),
                module_id: None,
                updated_at: (!node.updated_at.is_empty()).then(|| node.updated_at.clone()),
            },
            ResourceRef::Module { module_id } => ResourceSummary {
                id: self.id(),
                title: module_label(module_id.as_str()).to_string(),
                code: None,
                kind: TabKind::Module,
                module_id: Some(module_id.clone()),
                updated_at: None,
            },
            ResourceRef::Console { id, title } => ResourceSummary {
                id: id.clone(),
                title: title.clone(),
                code: None,
                kind: TabKind::Module,
                module_id: Some(ModuleId::new(modules::TERMINAL)),
                updated_at: None,
            },
            ResourceRef::Builtin { view } => ResourceSummary {
                id: view.tab_id().to_string(),
                title: view.title().to_string(),
                code: None,
                kind: TabKind::Resource(ResourceKind::Folder),
                module_id: None,
                updated_at: None,
            },
        }
    }
}

impl From<ResourceNode> for ResourceRef {
    fn from(node: ResourceNode) -> Self {
        ResourceRef::node(node)
    }
}

/// Compact description of a resource, used for tabs, pins and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub kind: TabKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<ModuleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// An open workspace tab.
pub type Tab = ResourceSummary;
