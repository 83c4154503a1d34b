#![cfg(test)]

use std::collections::{HashMap, HashSet};

use crate::Uid;
use crate::core::{SequentialUids, UidGenerator};
use crate::import::{ImportError, assign_identifiers};
use crate::sources::MapSourceQuery;
use crate::xml::Document;

/// Map-source stub: everything is visible and unlabelled unless told otherwise.
#[derive(Debug, Default)]
pub struct StubSources {
    hidden: HashSet<(String, Option<String>)>,
    labels: HashMap<String, String>,
}

impl StubSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hidden(mut self, source: &str, layer: Option<&str>) -> Self {
        self.hidden
            .insert((source.to_string(), layer.map(str::to_string)));
        self
    }

    pub fn labelled(mut self, source: &str, label: &str) -> Self {
        self.labels.insert(source.to_string(), label.to_string());
        self
    }
}

impl MapSourceQuery for StubSources {
    fn visibility_of(&self, map_source: &str, layer: Option<&str>) -> bool {
        !self
            .hidden
            .contains(&(map_source.to_string(), layer.map(str::to_string)))
    }

    fn label_of(&self, map_source: &str) -> Option<&str> {
        self.labels.get(map_source).map(String::as_str)
    }
}

/// Generator that fails once `limit` identifiers have been handed out.
pub struct FailingUids {
    limit: usize,
    issued: usize,
}

impl FailingUids {
    pub fn after(limit: usize) -> Self {
        Self { limit, issued: 0 }
    }
}

impl UidGenerator for FailingUids {
    fn generate(&mut self) -> Result<Uid, ImportError> {
        if self.issued >= self.limit {
            return Err(ImportError::IdGeneration("entropy source unavailable".to_string()));
        }
        self.issued += 1;
        Ok(Uid::new(format!("f-{}", self.issued)))
    }
}

/// Parse `xml` and assign `n-<index>` identifiers in document order.
pub fn with_ids(xml: &str) -> Document {
    let mut doc: Document = xml.parse().expect("test XML must parse");
    assign_identifiers(&mut doc, &mut SequentialUids::new("n"), "uuid")
        .expect("sequential ids never fail");
    doc
}

/// A small catalog touching every node kind.
pub fn sample_catalog() -> Document {
    r#"<catalog>
        <group title="Base maps" multiple="false" expand="true">
            <layer title="Streets" src="streets"/>
            <layer title="Aerial" src="aerial/2020"/>
        </group>
        <group title="Overlays">
            <group title="Hydrology">
                <layer src="rivers:lakes"/>
            </group>
            <note>ignored</note>
            <layer title="Parcels" src="parcels/all"/>
        </group>
        <layer title="Notes"/>
    </catalog>"#
        .parse()
        .expect("sample catalog must parse")
}
