//! XML document layer.
//!
//! Reads catalog (or whole mapbook) documents with quick-xml into an
//! arena-backed [`Document`] that the importer walks through the
//! [`CatalogTree`](crate::tree::CatalogTree) trait.

pub mod document;
pub mod errors;
pub mod quick;

pub use document::{Document, Element, NodeId};
pub use errors::{CatalogError, DeserializeError, ErrorContext};
pub use quick::{Attrs, parse_boolean};
