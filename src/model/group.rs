use serde::{Deserialize, Serialize};

use crate::Uid;

/// A container of layers and nested groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uid,
    /// Display title, verbatim from the document.
    pub label: Option<String>,
    /// Whether the group starts expanded.
    pub expand: bool,
    /// `true` for independently toggled children (checkboxes),
    /// `false` for mutually exclusive children (radio buttons).
    pub multiple: bool,
    /// Enclosing group, `None` at the top level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uid>,
    /// Always empty when emitted; filled in by whoever replays the
    /// `LinkChild` actions.
    #[serde(default)]
    pub children: Vec<Uid>,
}

impl Group {
    pub fn new(id: Uid) -> Self {
        Self {
            id,
            label: None,
            expand: false,
            multiple: true,
            parent_id: None,
            children: Vec::new(),
        }
    }
}
