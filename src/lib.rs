//! # layercat
//!
//! Converts a map catalog document (nested `<group>` and `<layer>` elements)
//! into a flat, ordered list of [`Action`]s. Replaying the actions in order
//! builds an id-indexed copy of the hierarchy in a downstream store.
//!
//! Layer visibility and default labels are resolved against a map-source
//! registry supplied through [`MapSourceQuery`].

pub mod core;
pub mod import;
pub mod model;
pub mod sources;
pub mod tree;
pub mod xml;

mod test_utils;

pub use crate::core::{RandomUids, SequentialUids, Uid, UidGenerator};
pub use crate::import::{
    CatalogImporter, ImportError, ImportOptions, import_catalog_str, parse_catalog,
};
pub use crate::model::{Action, ActionSink, Group, Layer, SourceRef};
pub use crate::sources::{MapSourceQuery, MapSourceRegistry};
pub use crate::tree::{CatalogTree, NodeKind};
pub use crate::xml::{CatalogError, Document};
