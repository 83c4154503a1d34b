//! Catalog import.
//!
//! Importing happens in two passes over the input tree:
//!
//! 1. [`assign_identifiers`] attaches a fresh [`Uid`](crate::Uid) to every node.
//! 2. [`walk_subtree`] translates groups and layers in document order and
//!    emits the [`Action`] log that rebuilds the hierarchy downstream.
//!
//! ## Example
//!
//! ```rust
//! use layercat::import::CatalogImporter;
//! use layercat::model::Action;
//! use layercat::sources::{MapSource, MapSourceRegistry};
//! use layercat::xml::Document;
//!
//! let mut doc: Document = r#"
//!     <catalog>
//!         <group title="Transport">
//!             <layer src="roads/streets"/>
//!         </group>
//!     </catalog>"#
//!     .parse()
//!     .unwrap();
//!
//! let mut sources = MapSourceRegistry::new();
//! sources.insert(MapSource::new("roads").with_label("Roads").with_layer("streets", true));
//!
//! let actions = CatalogImporter::new().import(&mut doc, &sources).unwrap();
//! assert_eq!(actions.len(), 4);
//! match &actions[1] {
//!     Action::CreateLayer { entity } => {
//!         assert_eq!(entity.label.as_deref(), Some("Roads"));
//!         assert!(entity.visible);
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub mod assign;
pub mod translate;
pub mod walk;

pub use assign::assign_identifiers;
pub use translate::{translate_group, translate_layer};
pub use walk::walk_subtree;

use log::debug;
use thiserror::Error;

use crate::core::{RandomUids, UidGenerator};
use crate::model::{Action, ActionSink};
use crate::sources::MapSourceQuery;
use crate::tree::CatalogTree;
use crate::xml::{CatalogError, Document};

/// Errors that abort an import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The identifier generator could not produce a value.
    #[error("identifier generation failed: {0}")]
    IdGeneration(String),

    /// A node reached translation without an assigned identifier.
    #[error("{element} has no '{attribute}' attribute; identifiers must be assigned first")]
    MissingIdentifier { element: String, attribute: String },
}

/// Attribute names and delimiters used while importing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Attribute that receives the assigned identifier.
    pub id_attribute: String,
    pub title_attribute: String,
    /// Attribute holding the composite source-reference list.
    pub source_attribute: String,
    pub expand_attribute: String,
    pub multiple_attribute: String,
    /// Separates source references from each other.
    pub source_separator: char,
    /// Separates a map-source name from its sub-layer name.
    pub layer_separator: char,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            id_attribute: "uuid".to_string(),
            title_attribute: "title".to_string(),
            source_attribute: "src".to_string(),
            expand_attribute: "expand".to_string(),
            multiple_attribute: "multiple".to_string(),
            source_separator: ':',
            layer_separator: '/',
        }
    }
}

impl ImportOptions {
    pub fn with_id_attribute(mut self, name: impl Into<String>) -> Self {
        self.id_attribute = name.into();
        self
    }

    pub fn with_title_attribute(mut self, name: impl Into<String>) -> Self {
        self.title_attribute = name.into();
        self
    }

    pub fn with_source_attribute(mut self, name: impl Into<String>) -> Self {
        self.source_attribute = name.into();
        self
    }

    pub fn with_expand_attribute(mut self, name: impl Into<String>) -> Self {
        self.expand_attribute = name.into();
        self
    }

    pub fn with_multiple_attribute(mut self, name: impl Into<String>) -> Self {
        self.multiple_attribute = name.into();
        self
    }

    pub fn with_source_separator(mut self, separator: char) -> Self {
        self.source_separator = separator;
        self
    }

    pub fn with_layer_separator(mut self, separator: char) -> Self {
        self.layer_separator = separator;
        self
    }
}

/// Entry point: assigns identifiers, then walks the tree.
#[derive(Debug, Clone, Default)]
pub struct CatalogImporter<G = RandomUids> {
    options: ImportOptions,
    generator: G,
}

impl CatalogImporter<RandomUids> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: UidGenerator> CatalogImporter<G> {
    /// Replace the identifier generator.
    pub fn with_generator<H: UidGenerator>(self, generator: H) -> CatalogImporter<H> {
        CatalogImporter {
            options: self.options,
            generator,
        }
    }

    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Import the whole tree, starting below its root.
    pub fn import<T, Q>(&mut self, tree: &mut T, sources: &Q) -> Result<Vec<Action>, ImportError>
    where
        T: CatalogTree,
        Q: MapSourceQuery + ?Sized,
    {
        let root = tree.root();
        self.import_at(tree, root, sources)
    }

    /// Import the subtree below `catalog`.
    ///
    /// Children of `catalog` become top-level entities, even when `catalog`
    /// is itself a group. Identifiers are still assigned across the whole tree.
    pub fn import_at<T, Q>(
        &mut self,
        tree: &mut T,
        catalog: T::Node,
        sources: &Q,
    ) -> Result<Vec<Action>, ImportError>
    where
        T: CatalogTree,
        Q: MapSourceQuery + ?Sized,
    {
        let mut actions = Vec::new();
        self.import_into(tree, catalog, sources, &mut actions)?;
        Ok(actions)
    }

    /// Like [`import_at`](Self::import_at), writing into `sink`.
    ///
    /// Nothing reaches `sink` if identifier assignment fails.
    pub fn import_into<T, Q, S>(
        &mut self,
        tree: &mut T,
        catalog: T::Node,
        sources: &Q,
        sink: &mut S,
    ) -> Result<(), ImportError>
    where
        T: CatalogTree,
        Q: MapSourceQuery + ?Sized,
        S: ActionSink + ?Sized,
    {
        assign_identifiers(tree, &mut self.generator, &self.options.id_attribute)?;
        walk_subtree(&*tree, catalog, None, sources, &self.options, sink)?;
        debug!("imported catalog {}", tree.describe(catalog));
        Ok(())
    }
}

/// Import a whole tree with default options and random identifiers.
pub fn parse_catalog<T, Q>(tree: &mut T, sources: &Q) -> Result<Vec<Action>, ImportError>
where
    T: CatalogTree,
    Q: MapSourceQuery + ?Sized,
{
    CatalogImporter::new().import(tree, sources)
}

/// Parse XML and import it.
///
/// When the document is a full mapbook, the first `<catalog>` element is
/// imported; otherwise everything below the root.
pub fn import_catalog_str<Q>(xml: &str, sources: &Q) -> Result<Vec<Action>, CatalogError>
where
    Q: MapSourceQuery + ?Sized,
{
    let mut doc: Document = xml.parse()?;
    let catalog = doc.find_first("catalog").unwrap_or(doc.root());
    Ok(CatalogImporter::new().import_at(&mut doc, catalog, sources)?)
}
