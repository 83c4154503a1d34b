#![allow(dead_code)]

use std::collections::HashMap;

use layercat::{Action, Group, Layer, Uid};

/// Minimal downstream store: applies actions strictly in order and panics on
/// anything a single forward pass could not handle.
#[derive(Debug, Default)]
pub struct ReplayStore {
    pub groups: HashMap<Uid, Group>,
    pub layers: HashMap<Uid, Layer>,
    pub roots: Vec<Uid>,
    /// Created-but-unlinked entities, per parent id.
    pending: HashMap<Option<Uid>, usize>,
    linked: HashMap<Uid, bool>,
}

impl ReplayStore {
    pub fn replay(actions: &[Action]) -> Self {
        let mut store = Self::default();
        for action in actions {
            store.apply(action);
        }
        assert!(
            store.linked.values().all(|l| *l),
            "every created entity must be linked"
        );
        store
    }

    fn parent_of(&self, id: &Uid) -> Option<Uid> {
        self.groups
            .get(id)
            .map(|g| g.parent_id.clone())
            .or_else(|| self.layers.get(id).map(|l| l.parent_id.clone()))
            .unwrap_or_else(|| panic!("link to unknown entity {}", id))
    }

    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::CreateGroup { entity } => {
                assert!(entity.children.is_empty(), "groups arrive without children");
                self.created(&entity.id, &entity.parent_id);
                self.groups.insert(entity.id.clone(), entity.clone());
            }
            Action::CreateLayer { entity } => {
                self.created(&entity.id, &entity.parent_id);
                self.layers.insert(entity.id.clone(), entity.clone());
            }
            Action::LinkChild {
                parent_id,
                child_id,
            } => {
                let recorded = self.parent_of(child_id);
                assert_eq!(&recorded, parent_id, "link disagrees with parentId");
                assert_eq!(
                    self.pending.get(&Some(child_id.clone())).copied().unwrap_or(0),
                    0,
                    "{} linked before its descendants",
                    child_id
                );
                let linked = self.linked.get_mut(child_id).expect("created before linked");
                assert!(!*linked, "{} linked twice", child_id);
                *linked = true;
                *self.pending.get_mut(parent_id).expect("pending parent") -= 1;

                match parent_id {
                    Some(parent) => self
                        .groups
                        .get_mut(parent)
                        .unwrap_or_else(|| panic!("parent {} is not an existing group", parent))
                        .children
                        .push(child_id.clone()),
                    None => self.roots.push(child_id.clone()),
                }
            }
        }
    }

    fn created(&mut self, id: &Uid, parent_id: &Option<Uid>) {
        assert!(
            !self.groups.contains_key(id) && !self.layers.contains_key(id),
            "duplicate id {}",
            id
        );
        if let Some(parent) = parent_id {
            assert!(
                self.groups.contains_key(parent),
                "{} refers to parent {} before it exists",
                id,
                parent
            );
            assert!(
                !self.linked[parent],
                "{} created after its parent {} was linked",
                id,
                parent
            );
        }
        *self.pending.entry(parent_id.clone()).or_default() += 1;
        self.linked.insert(id.clone(), false);
    }

    /// Indented outline of the rebuilt tree, identifiers left out.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for id in &self.roots {
            self.render_node(id, 0, &mut lines);
        }
        lines
    }

    fn render_node(&self, id: &Uid, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        if let Some(group) = self.groups.get(id) {
            lines.push(format!(
                "{}group {:?} expand={} multiple={}",
                indent, group.label, group.expand, group.multiple
            ));
            for child in &group.children {
                self.render_node(child, depth + 1, lines);
            }
        } else if let Some(layer) = self.layers.get(id) {
            let sources: Vec<String> = layer.sources.iter().map(|s| s.to_string()).collect();
            lines.push(format!(
                "{}layer {:?} {:?} visible={}",
                indent, layer.label, sources, layer.visible
            ));
        }
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
