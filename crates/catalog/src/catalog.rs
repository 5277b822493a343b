use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::{self, ModuleId, ResourceNode};
use crate::query::CatalogQuery;

/// Errors raised while building or querying a catalog.
/// 資源目錄的錯誤類型。
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("module '{0}' not found")]
    NotFound(ModuleId),
    #[error("duplicate resource id '{0}'")]
    DuplicateId(String),
    #[error("resource '{0}' is not a folder but carries children")]
    LeafWithChildren(String),
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only source of resource trees, keyed by navigation module.
///
/// The workspace only ever reads from a catalog; implementations may be
/// backed by static data or by a remote index.
pub trait ResourceCatalog {
    /// Ordered top-level nodes for `module`.
    fn get_tree(&self, module: &ModuleId) -> Result<&[ResourceNode], CatalogError>;

    /// Modules this catalog knows about.
    fn modules(&self) -> Vec<&ModuleId>;

    /// Flat lookup by resource id across every module.
    fn find(&self, id: &str) -> Option<&ResourceNode>;

    /// Text search; unknown modules yield an empty tree.
    fn search(&self, module: &ModuleId, text: &str) -> Vec<ResourceNode> {
        self.search_filtered(module, &CatalogQuery::text(text))
    }

    /// Facet + text search; unknown modules yield an empty tree.
    fn search_filtered(&self, module: &ModuleId, query: &CatalogQuery) -> Vec<ResourceNode> {
        match self.get_tree(module) {
            Ok(nodes) => query.apply(nodes),
            Err(err) => {
                tracing::debug!(module = %module, error = %err, "search on unavailable module");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    modules: BTreeMap<ModuleId, Vec<ResourceNode>>,
}

/// In-memory catalog validated once at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    modules: BTreeMap<ModuleId, Vec<ResourceNode>>,
    index: HashMap<String, ModuleId>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate ids and leaves with children.
    pub fn from_modules<I>(modules: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (ModuleId, Vec<ResourceNode>)>,
    {
        let mut catalog = Self::new();
        for (module, nodes) in modules {
            catalog.insert_module(module, nodes)?;
        }
        Ok(catalog)
    }

    /// Adds (or replaces) a module's tree.
    pub fn insert_module(
        &mut self,
        module: ModuleId,
        nodes: Vec<ResourceNode>,
    ) -> Result<(), CatalogError> {
        let replaced: HashSet<String> = self
            .modules
            .get(&module)
            .map(|previous| {
                previous
                    .iter()
                    .flat_map(ResourceNode::walk)
                    .map(|node| node.id.clone())
                    .collect()
            })
            .unwrap_or_default();

        let mut seen = HashSet::new();
        for node in nodes.iter().flat_map(ResourceNode::walk) {
            if !node.is_folder() && !node.children.is_empty() {
                return Err(CatalogError::LeafWithChildren(node.id.clone()));
            }
            let taken = self.index.contains_key(&node.id) && !replaced.contains(&node.id);
            if taken || !seen.insert(node.id.as_str()) {
                return Err(CatalogError::DuplicateId(node.id.clone()));
            }
        }

        for id in &replaced {
            self.index.remove(id);
        }
        for node in nodes.iter().flat_map(ResourceNode::walk) {
            self.index.insert(node.id.clone(), module.clone());
        }

        tracing::debug!(module = %module, roots = nodes.len(), "catalog module registered");
        self.modules.insert(module, nodes);
        Ok(())
    }

    pub fn from_json(input: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(input)?;
        Self::from_modules(file.modules)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        let file = CatalogFile {
            modules: self.modules.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Module that owns the resource `id`.
    pub fn module_of(&self, id: &str) -> Option<&ModuleId> {
        self.index.get(id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl ResourceCatalog for StaticCatalog {
    fn get_tree(&self, module: &ModuleId) -> Result<&[ResourceNode], CatalogError> {
        self.modules
            .get(module)
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::NotFound(module.clone()))
    }

    fn modules(&self) -> Vec<&ModuleId> {
        self.modules.keys().collect()
    }

    fn find(&self, id: &str) -> Option<&ResourceNode> {
        let module = self.index.get(id)?;
        self.modules
            .get(module)?
            .iter()
            .find_map(|root| root.find(id))
    }
}

/// Convenience used by views that only need leaves of a module.
pub fn module_leaves<'a, C>(catalog: &'a C, module: &ModuleId) -> Vec<&'a ResourceNode>
where
    C: ResourceCatalog + ?Sized,
{
    catalog
        .get_tree(module)
        .map(node::leaves)
        .unwrap_or_default()
}
