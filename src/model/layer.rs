use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Uid;

/// Pointer from a layer to one map source, optionally to one of its sub-layers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub map_source_name: String,
    pub layer_name: Option<String>,
}

impl SourceRef {
    pub fn new(map_source_name: impl Into<String>, layer_name: Option<&str>) -> Self {
        Self {
            map_source_name: map_source_name.into(),
            layer_name: layer_name.map(str::to_string),
        }
    }

    /// Parse one `source[<sep>layer]` reference.
    ///
    /// Only the first two segments count; anything after a second separator
    /// is ignored.
    pub fn parse(reference: &str, layer_separator: char) -> Self {
        let mut parts = reference.split(layer_separator);
        let source = parts.next().unwrap_or_default();
        Self::new(source, parts.next())
    }

    /// Parse a composite reference list, preserving declaration order.
    pub fn parse_list(list: &str, source_separator: char, layer_separator: char) -> Vec<Self> {
        list.split(source_separator)
            .map(|reference| Self::parse(reference, layer_separator))
            .collect()
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.layer_name {
            Some(layer) => write!(f, "{}/{}", self.map_source_name, layer),
            None => f.write_str(&self.map_source_name),
        }
    }
}

/// A leaf of the catalog backed by one or more map sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: Uid,
    pub label: Option<String>,
    /// Source references in declaration order.
    pub sources: Vec<SourceRef>,
    /// AND of every source's visibility; `true` when there are no sources.
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uid>,
}
