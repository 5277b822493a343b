//! Hierarchical resource catalog for the NovaFlow shell.
//!
//! A catalog maps navigation modules to ordered resource trees. The shell
//! treats it as a read-only collaborator: it asks for a module's tree, runs
//! facet/text searches over it, and looks resources up by id.

pub mod builtin;
pub mod catalog;
pub mod modules;
pub mod node;
pub mod query;

pub use builtin::demo_catalog;
pub use catalog::{module_leaves, CatalogError, ResourceCatalog, StaticCatalog};
pub use modules::module_label;
pub use node::{leaves, ModuleId, ResourceKind, ResourceNode, UnknownResourceKind, Walk};
pub use query::{filter_by_kind, search, CatalogQuery};
