//! Navigable tree interface consumed by the importer.
//!
//! The importer never depends on a concrete document type. Anything that can
//! report a node's kind, its attributes, its children in document order and
//! its parent, and that accepts new attributes, can be imported.

use std::fmt;

use crate::xml::{Document, NodeId};

/// What a catalog node describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Group,
    Layer,
    /// Anything else. Skipped by the importer, together with its subtree.
    Other,
}

impl NodeKind {
    /// Classify an element by its tag name.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "group" => NodeKind::Group,
            "layer" => NodeKind::Layer,
            _ => NodeKind::Other,
        }
    }
}

pub trait CatalogTree {
    type Node: Copy + Eq + fmt::Debug;

    fn root(&self) -> Self::Node;

    fn kind(&self, node: Self::Node) -> NodeKind;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Child nodes in document order.
    fn children(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// Short human-readable description used in errors and logs.
    fn describe(&self, node: Self::Node) -> String {
        format!("{:?} {:?}", self.kind(node), node)
    }
}

impl CatalogTree for Document {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        Document::root(self)
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        NodeKind::from_tag(self.name(node))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        Document::attribute(self, node, name)
    }

    fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        Document::children(self, node).iter().copied()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Document::parent(self, node)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        Document::set_attribute(self, node, name, value);
    }

    fn describe(&self, node: NodeId) -> String {
        format!("<{}> #{}", self.name(node), node.index())
    }
}
