use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a navigation module (a top-level resource category).
/// 導覽模組的識別碼。
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ModuleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for ModuleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ModuleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The closed set of resource kinds the platform knows about.
/// 平台支援的資源類型。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Folder,
    Page,
    Model,
    Logic,
    Workflow,
    Connector,
    Spreadsheet,
    Ux,
    Script,
    Chart,
    Db,
    Stream,
    Component,
    Accounting,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 14] = [
        ResourceKind::Folder,
        ResourceKind::Page,
        ResourceKind::Model,
        ResourceKind::Logic,
        ResourceKind::Workflow,
        ResourceKind::Connector,
        ResourceKind::Spreadsheet,
        ResourceKind::Ux,
        ResourceKind::Script,
        ResourceKind::Chart,
        ResourceKind::Db,
        ResourceKind::Stream,
        ResourceKind::Component,
        ResourceKind::Accounting,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Folder => "folder",
            ResourceKind::Page => "page",
            ResourceKind::Model => "model",
            ResourceKind::Logic => "logic",
            ResourceKind::Workflow => "workflow",
            ResourceKind::Connector => "connector",
            ResourceKind::Spreadsheet => "spreadsheet",
            ResourceKind::Ux => "ux",
            ResourceKind::Script => "script",
            ResourceKind::Chart => "chart",
            ResourceKind::Db => "db",
            ResourceKind::Stream => "stream",
            ResourceKind::Component => "component",
            ResourceKind::Accounting => "accounting",
        }
    }

    pub fn is_folder(self) -> bool {
        self == ResourceKind::Folder
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string does not name a known [`ResourceKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource kind '{0}'")]
pub struct UnknownResourceKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownResourceKind(value.to_string()))
    }
}

/// A folder or leaf entry of a module's resource tree.
/// 資源樹中的資料夾或葉節點。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    pub kind: ResourceKind,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResourceNode>,
}

impl ResourceNode {
    /// Creates a leaf with empty metadata.
    pub fn leaf(id: impl Into<String>, name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: String::new(),
            kind,
            version: String::new(),
            created_by: String::new(),
            updated_at: String::new(),
            description: None,
            tags: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a folder holding the given children.
    pub fn folder(
        id: impl Into<String>,
        name: impl Into<String>,
        children: Vec<ResourceNode>,
    ) -> Self {
        let mut node = Self::leaf(id, name, ResourceKind::Folder);
        node.children = children;
        node
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_owner(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    pub fn with_updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = updated_at.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Depth-first iterator over this node and all of its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Finds a node by id within this subtree.
    pub fn find(&self, id: &str) -> Option<&ResourceNode> {
        self.walk().find(|node| node.id == id)
    }
}

/// Pre-order traversal produced by [`ResourceNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a ResourceNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a ResourceNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Flattens a forest into its leaves, in display order.
pub fn leaves(nodes: &[ResourceNode]) -> Vec<&ResourceNode> {
    nodes
        .iter()
        .flat_map(ResourceNode::walk)
        .filter(|node| !node.is_folder())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Workflow".parse::<ResourceKind>(), Ok(ResourceKind::Workflow));
        assert_eq!(" db ".parse::<ResourceKind>(), Ok(ResourceKind::Db));
        assert!("widget".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn walk_visits_in_display_order() {
        let tree = ResourceNode::folder(
            "root",
            "Root",
            vec![
                ResourceNode::folder(
                    "a",
                    "A",
                    vec![ResourceNode::leaf("a1", "A1", ResourceKind::Page)],
                ),
                ResourceNode::leaf("b", "B", ResourceKind::Model),
            ],
        );
        let ids: Vec<_> = tree.walk().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "a1", "b"]);
        assert_eq!(tree.find("a1").map(|n| n.kind), Some(ResourceKind::Page));
    }

    #[test]
    fn node_json_uses_camel_case_and_skips_empty_children() {
        let node = ResourceNode::leaf("f1", "Daily reconciliation", ResourceKind::Workflow)
            .with_owner("liuqing")
            .with_updated_at("2025-05-14 10:28:07");
        let json = serde_json::to_value(&node).expect("serialize");
        assert_eq!(json["createdBy"], "liuqing");
        assert_eq!(json["updatedAt"], "2025-05-14 10:28:07");
        assert!(json.get("children").is_none());
    }
}
