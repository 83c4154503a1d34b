//! Subtree walker: turns a catalog subtree into a flat action log.
//!
//! Groups are emitted pre-order (create first), their `LinkChild` post-order
//! (after the whole nested block). A consumer replaying the log therefore
//! never sees a link to an entity that is not already fully built.

use log::debug;

use crate::Uid;
use crate::import::translate::{translate_group, translate_layer};
use crate::import::{ImportError, ImportOptions};
use crate::model::{Action, ActionSink};
use crate::sources::MapSourceQuery;
use crate::tree::{CatalogTree, NodeKind};

/// Emit create and link actions for every descendant of `subtree`.
///
/// `parent_id` is recorded both as the `parent_id` of the direct children
/// and on their `LinkChild` actions, `None` at the top level. Nodes of unknown kind are skipped along
/// with everything below them.
pub fn walk_subtree<T, Q, S>(
    tree: &T,
    subtree: T::Node,
    parent_id: Option<&Uid>,
    sources: &Q,
    options: &ImportOptions,
    sink: &mut S,
) -> Result<(), ImportError>
where
    T: CatalogTree,
    Q: MapSourceQuery + ?Sized,
    S: ActionSink + ?Sized,
{
    for child in tree.children(subtree) {
        let child_id = match tree.kind(child) {
            NodeKind::Group => {
                let group = translate_group(tree, child, parent_id, options)?;
                let id = group.id.clone();
                sink.emit(Action::CreateGroup { entity: group });
                walk_subtree(tree, child, Some(&id), sources, options, sink)?;
                id
            }
            NodeKind::Layer => {
                let layer = translate_layer(tree, child, parent_id, sources, options)?;
                let id = layer.id.clone();
                sink.emit(Action::CreateLayer { entity: layer });
                id
            }
            NodeKind::Other => {
                debug!("skipping {}", tree.describe(child));
                continue;
            }
        };

        sink.emit(Action::LinkChild {
            parent_id: parent_id.cloned(),
            child_id,
        });
    }

    Ok(())
}
