//! In-memory map-source registry.

use std::collections::HashMap;

use log::{debug, warn};

use crate::sources::MapSourceQuery;
use crate::xml::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSourceLayer {
    pub name: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSource {
    pub name: String,
    pub label: Option<String>,
    pub visible: bool,
    pub layers: Vec<MapSourceLayer>,
}

impl MapSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            visible: true,
            layers: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_layer(mut self, name: impl Into<String>, visible: bool) -> Self {
        self.layers.push(MapSourceLayer {
            name: name.into(),
            visible,
        });
        self
    }

    pub fn layer(&self, name: &str) -> Option<&MapSourceLayer> {
        self.layers.iter().find(|l| l.name == name)
    }
}

/// Map sources keyed by name.
///
/// Unknown sources and unknown sub-layers are reported as not visible.
#[derive(Debug, Clone, Default)]
pub struct MapSourceRegistry {
    sources: HashMap<String, MapSource>,
}

impl MapSourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a source.
    pub fn insert(&mut self, source: MapSource) -> Option<MapSource> {
        self.sources.insert(source.name.clone(), source)
    }

    pub fn get(&self, name: &str) -> Option<&MapSource> {
        self.sources.get(name)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Collect every `<map-source>` element of a mapbook.
    ///
    /// Sub-layers come from `<layer name=".." status="on|off"/>` children and
    /// default to off. A source with sub-layers is visible when any of them is on.
    pub fn from_document(doc: &Document) -> Self {
        let mut registry = Self::new();

        for node in doc.find_all("map-source") {
            let attrs = &doc.element(node).attrs;
            let Some(name) = attrs.get_opt("name") else {
                warn!("skipping <map-source> #{} without a name", node.index());
                continue;
            };

            let mut source = MapSource::new(name);
            source.label = attrs.get_opt_string("title");

            for &child in doc.children(node) {
                if doc.name(child) != "layer" {
                    continue;
                }
                let layer_attrs = &doc.element(child).attrs;
                match layer_attrs.get_opt("name") {
                    Some(layer_name) => {
                        let on = layer_attrs.get_bool_or("status", false);
                        source = source.with_layer(layer_name, on);
                    }
                    None => warn!("map-source '{}' has a layer without a name", name),
                }
            }

            if !source.layers.is_empty() {
                source.visible = source.layers.iter().any(|l| l.visible);
            }

            if registry.insert(source).is_some() {
                warn!("map-source '{}' defined more than once, keeping the last", name);
            }
        }

        registry
    }
}

impl MapSourceQuery for MapSourceRegistry {
    fn visibility_of(&self, map_source: &str, layer: Option<&str>) -> bool {
        let Some(source) = self.sources.get(map_source) else {
            debug!("unknown map-source '{}', treating as hidden", map_source);
            return false;
        };

        match layer {
            None => source.visible,
            Some(layer_name) => match source.layer(layer_name) {
                Some(l) => l.visible,
                None => {
                    debug!(
                        "map-source '{}' has no layer '{}', treating as hidden",
                        map_source, layer_name
                    );
                    false
                }
            },
        }
    }

    fn label_of(&self, map_source: &str) -> Option<&str> {
        self.sources
            .get(map_source)
            .and_then(|s| s.label.as_deref())
            .filter(|label| !label.is_empty())
    }
}
