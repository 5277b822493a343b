//! Kind-facet filtering and text search over resource trees.
//!
//! Facets are applied first and drop folders left without leaves; the text
//! query then keeps any leaf whose name or code contains the query
//! (case-insensitive) together with its ancestor folders. A folder whose own
//! name or code matches keeps its whole (facet-filtered) subtree.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};

use crate::node::{ResourceKind, ResourceNode};

/// Combined facet + text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub text: String,
    pub kinds: BTreeSet<ResourceKind>,
}

impl CatalogQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kinds: BTreeSet::new(),
        }
    }

    pub fn with_kinds<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = ResourceKind>,
    {
        self.kinds.extend(kinds);
        self
    }

    /// `true` when neither a facet nor a text query is set.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.kinds.is_empty()
    }

    /// Filters `nodes`, returning a new forest that preserves order.
    pub fn apply(&self, nodes: &[ResourceNode]) -> Vec<ResourceNode> {
        let faceted = if self.kinds.is_empty() {
            nodes.to_vec()
        } else {
            filter_by_kind(nodes, &self.kinds)
        };

        match build_matcher(&self.text) {
            Some(matcher) => search_nodes(&faceted, &matcher),
            None => faceted,
        }
    }
}

/// Keeps leaves whose kind is in `kinds`; folders survive only with surviving leaves.
pub fn filter_by_kind(nodes: &[ResourceNode], kinds: &BTreeSet<ResourceKind>) -> Vec<ResourceNode> {
    nodes
        .iter()
        .filter_map(|node| {
            if node.is_folder() {
                let children = filter_by_kind(&node.children, kinds);
                if children.is_empty() {
                    return None;
                }
                let mut kept = node.clone();
                kept.children = children;
                Some(kept)
            } else if kinds.contains(&node.kind) {
                Some(node.clone())
            } else {
                None
            }
        })
        .collect()
}

/// Case-insensitive substring search on name or code.
pub fn search(nodes: &[ResourceNode], query: &str) -> Vec<ResourceNode> {
    match build_matcher(query) {
        Some(matcher) => search_nodes(nodes, &matcher),
        None => nodes.to_vec(),
    }
}

fn build_matcher(query: &str) -> Option<Regex> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut builder = RegexBuilder::new(&regex::escape(trimmed));
    builder.case_insensitive(true);
    // An escaped literal always compiles.
    builder.build().ok()
}

fn node_matches(node: &ResourceNode, matcher: &Regex) -> bool {
    matcher.is_match(&node.name) || (!node.code.is_empty() && matcher.is_match(&node.code))
}

fn search_nodes(nodes: &[ResourceNode], matcher: &Regex) -> Vec<ResourceNode> {
    nodes
        .iter()
        .filter_map(|node| {
            if node_matches(node, matcher) {
                return Some(node.clone());
            }
            if !node.is_folder() {
                return None;
            }
            let children = search_nodes(&node.children, matcher);
            if children.is_empty() {
                return None;
            }
            let mut kept = node.clone();
            kept.children = children;
            Some(kept)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ResourceNode> {
        vec![
            ResourceNode::folder(
                "integration_cat",
                "Data integration",
                vec![
                    ResourceNode::leaf("integration_cat-0", "Data stream", ResourceKind::Stream)
                        .with_code("DS_MAIN"),
                    ResourceNode::leaf("integration_cat-1", "Connector", ResourceKind::Connector)
                        .with_code("CONN_FIN"),
                ],
            ),
            ResourceNode::folder(
                "empty_cat",
                "Nothing here",
                vec![ResourceNode::folder("nested", "Nested", Vec::new())],
            ),
            ResourceNode::leaf("lonely", "Lonely report", ResourceKind::Chart),
        ]
    }

    #[test]
    fn search_keeps_ancestors_of_matching_leaves() {
        let result = search(&sample(), "stream");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "integration_cat");
        assert_eq!(result[0].children.len(), 1);
        assert_eq!(result[0].children[0].id, "integration_cat-0");
    }

    #[test]
    fn search_matches_code_case_insensitively() {
        let result = search(&sample(), "conn_fin");
        assert_eq!(result[0].children[0].id, "integration_cat-1");
    }

    #[test]
    fn matching_folder_keeps_its_subtree() {
        let result = search(&sample(), "INTEGRATION");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].children.len(), 2);
    }

    #[test]
    fn blank_query_returns_everything() {
        assert_eq!(search(&sample(), "   "), sample());
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(search(&sample(), ".*").is_empty());
    }

    #[test]
    fn kind_filter_drops_empty_folders_before_search() {
        let query = CatalogQuery::text("data").with_kinds([ResourceKind::Connector]);
        let result = query.apply(&sample());
        // The folder name matches, but only the connector survives the facet.
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].children.len(), 1);
        assert_eq!(result[0].children[0].kind, ResourceKind::Connector);

        let charts = CatalogQuery::default().with_kinds([ResourceKind::Chart]);
        let result = charts.apply(&sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "lonely");
    }
}
