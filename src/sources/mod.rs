//! Read-only access to the map-source registry.
//!
//! The layer translator asks two questions of the registry: is a referenced
//! source (or sub-layer) currently visible, and does the source carry its own
//! label. Both are answered through [`MapSourceQuery`], passed in explicitly.

pub mod registry;

pub use registry::{MapSource, MapSourceLayer, MapSourceRegistry};

/// Visibility and label lookups against map sources.
///
/// Implementations must not fail for unknown sources or sub-layers; they
/// answer with a documented default instead.
pub trait MapSourceQuery {
    /// Current visibility of `map_source`, or of its sub-layer `layer` when given.
    fn visibility_of(&self, map_source: &str, layer: Option<&str>) -> bool;

    /// The source's own display label.
    fn label_of(&self, map_source: &str) -> Option<&str>;
}

impl<Q: MapSourceQuery + ?Sized> MapSourceQuery for &Q {
    fn visibility_of(&self, map_source: &str, layer: Option<&str>) -> bool {
        (**self).visibility_of(map_source, layer)
    }

    fn label_of(&self, map_source: &str) -> Option<&str> {
        (**self).label_of(map_source)
    }
}
