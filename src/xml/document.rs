//! Element tree for catalog documents.
//!
//! Elements live in a flat arena indexed by [`NodeId`]; parent and child
//! relationships are stored as ids. Text, comments and processing
//! instructions are dropped while reading, only elements and their
//! attributes are kept.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use log::debug;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::xml::errors::{CatalogError, DeserializeError, ErrorContext};
use crate::xml::quick::Attrs;

/// Index of an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the element in creation (document) order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single element: name, attributes and structural links.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: Attrs,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Element {
    fn new(name: String, attrs: Attrs, parent: Option<NodeId>) -> Self {
        Self {
            name,
            attrs,
            parent,
            children: Vec::new(),
        }
    }
}

/// A parsed XML document. Always has exactly one root element.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Document {
    /// Create a document holding only a root element.
    pub fn new(root_name: impl Into<String>) -> Self {
        let name = root_name.into();
        let attrs = Attrs::empty(name.clone());
        Self {
            nodes: vec![Element::new(name, attrs, None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element as the last child of `parent`.
    pub fn add_element(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let name = name.into();
        let attrs = Attrs::empty(name.clone());
        self.push_element(Some(parent), name, attrs)
    }

    fn push_element(&mut self, parent: Option<NodeId>, name: String, attrs: Attrs) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(name, attrs, parent));
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    pub fn element(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.nodes[id.0].attrs.get_opt(key)
    }

    pub fn set_attribute(&mut self, id: NodeId, key: impl Into<String>, value: impl Into<String>) {
        self.nodes[id.0].attrs.insert(key, value);
    }

    /// Builder-style variant of [`set_attribute`](Self::set_attribute).
    pub fn with_attribute(&mut self, id: NodeId, key: &str, value: &str) -> &mut Self {
        self.set_attribute(id, key, value);
        self
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Number of elements, root included. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// All element ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// First element named `name`, in document order.
    pub fn find_first(&self, name: &str) -> Option<NodeId> {
        self.ids().find(|id| self.name(*id) == name)
    }

    /// Every element named `name`, in document order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.ids().filter(move |id| self.name(*id) == name)
    }

    /// Read a document from any buffered reader.
    pub fn from_reader<R: BufRead>(source: R) -> Result<Self, DeserializeError> {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(true);
        let mut buf = Vec::new();
        read_document(&mut reader, &mut buf)
    }

    /// Read a document from a file, attaching the path to any error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = Reader::from_reader(BufReader::new(file));
        reader.trim_text(true);
        let mut buf = Vec::new();

        read_document(&mut reader, &mut buf).map_err(|source| CatalogError::Parse {
            source,
            context: ErrorContext::with_file_path(path)
                .with_position(reader.buffer_position() as u64)
                .with_parsing("document"),
        })
    }
}

impl FromStr for Document {
    type Err = DeserializeError;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        Self::from_reader(xml.as_bytes())
    }
}

fn open_element<R: BufRead>(
    doc: &mut Document,
    stack: &[NodeId],
    started: bool,
    start: &BytesStart<'_>,
    reader: &Reader<R>,
) -> Result<NodeId, DeserializeError> {
    let attrs = Attrs::from_start(start, reader)?;
    let name = attrs.element_name().to_string();

    match stack.last() {
        Some(parent) => Ok(doc.push_element(Some(*parent), name, attrs)),
        None if !started => {
            doc.nodes[0] = Element::new(name, attrs, None);
            Ok(doc.root())
        }
        None => Err(DeserializeError::Custom(format!(
            "Multiple root elements (found <{}> after the root was closed)",
            name
        ))),
    }
}

fn read_document<R: BufRead>(
    reader: &mut Reader<R>,
    buf: &mut Vec<u8>,
) -> Result<Document, DeserializeError> {
    // Placeholder root, replaced by the first element read.
    let mut doc = Document::new("");
    let mut stack: Vec<NodeId> = Vec::new();
    let mut started = false;

    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Start(e) => {
                let id = open_element(&mut doc, &stack, started, &e, reader)?;
                started = true;
                stack.push(id);
            }
            Event::Empty(e) => {
                open_element(&mut doc, &stack, started, &e, reader)?;
                started = true;
            }
            Event::End(e) => {
                if stack.pop().is_none() {
                    return Err(DeserializeError::UnexpectedEnd(
                        String::from_utf8_lossy(e.name().as_ref()).to_string(),
                    ));
                }
            }
            Event::Eof => {
                if !stack.is_empty() {
                    return Err(DeserializeError::UnexpectedEof);
                }
                break;
            }
            // Text, CData, Comment, PI, Decl, DocType
            _ => {}
        }
    }

    if !started {
        return Err(DeserializeError::MissingRoot);
    }

    debug!(
        "read document <{}> with {} elements",
        doc.name(doc.root()),
        doc.len()
    );
    Ok(doc)
}
