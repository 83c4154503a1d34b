//! Identifier assignment.

use log::trace;

use crate::core::UidGenerator;
use crate::import::ImportError;
use crate::tree::CatalogTree;

/// Attach a fresh identifier to every node of `tree` under `attribute`.
///
/// Visits each node exactly once, whatever its kind, starting at the root.
/// Any identifier already stored under `attribute` is overwritten, so two
/// imports of the same tree never share ids.
pub fn assign_identifiers<T, G>(
    tree: &mut T,
    generator: &mut G,
    attribute: &str,
) -> Result<(), ImportError>
where
    T: CatalogTree,
    G: UidGenerator + ?Sized,
{
    let mut pending = vec![tree.root()];
    let mut visited = 0usize;

    while let Some(node) = pending.pop() {
        let uid = generator.generate()?;
        trace!("{} -> {}", tree.describe(node), uid);
        tree.set_attribute(node, attribute, uid.as_str());
        visited += 1;

        let children: Vec<T::Node> = tree.children(node).collect();
        pending.extend(children.into_iter().rev());
    }

    trace!("assigned {} identifiers", visited);
    Ok(())
}
