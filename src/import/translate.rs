//! Per-node translation into entity records.

use itertools::Itertools;
use log::debug;

use crate::Uid;
use crate::import::{ImportError, ImportOptions};
use crate::model::{Group, Layer, SourceRef};
use crate::sources::MapSourceQuery;
use crate::tree::CatalogTree;
use crate::xml::parse_boolean;

/// Read the identifier previously attached to `node`.
pub(crate) fn node_uid<T: CatalogTree>(
    tree: &T,
    node: T::Node,
    options: &ImportOptions,
) -> Result<Uid, ImportError> {
    tree.attribute(node, &options.id_attribute)
        .map(Uid::from)
        .ok_or_else(|| ImportError::MissingIdentifier {
            element: tree.describe(node),
            attribute: options.id_attribute.clone(),
        })
}

fn flag<T: CatalogTree>(tree: &T, node: T::Node, attribute: &str, default: bool) -> bool {
    tree.attribute(node, attribute)
        .and_then(parse_boolean)
        .unwrap_or(default)
}

/// Translate a group node. `children` is left empty.
///
/// `parent_id` is the enclosing group in the walk, `None` at the top level.
pub fn translate_group<T: CatalogTree>(
    tree: &T,
    node: T::Node,
    parent_id: Option<&Uid>,
    options: &ImportOptions,
) -> Result<Group, ImportError> {
    Ok(Group {
        id: node_uid(tree, node, options)?,
        label: tree
            .attribute(node, &options.title_attribute)
            .map(str::to_string),
        expand: flag(tree, node, &options.expand_attribute, false),
        multiple: flag(tree, node, &options.multiple_attribute, true),
        parent_id: parent_id.cloned(),
        children: Vec::new(),
    })
}

/// Translate a layer node, resolving its sources against `sources`.
///
/// Without an explicit title the label comes from the first source, in
/// declaration order, that has one. Visibility is the AND of every
/// source's visibility.
pub fn translate_layer<T, Q>(
    tree: &T,
    node: T::Node,
    parent_id: Option<&Uid>,
    sources: &Q,
    options: &ImportOptions,
) -> Result<Layer, ImportError>
where
    T: CatalogTree,
    Q: MapSourceQuery + ?Sized,
{
    let mut label = tree
        .attribute(node, &options.title_attribute)
        .map(str::to_string);
    let mut refs = Vec::new();
    let mut all_visible = true;

    if let Some(list) = tree
        .attribute(node, &options.source_attribute)
        .filter(|s| !s.is_empty())
    {
        refs = SourceRef::parse_list(list, options.source_separator, options.layer_separator);

        for reference in &refs {
            all_visible &= sources
                .visibility_of(&reference.map_source_name, reference.layer_name.as_deref());

            if label.as_deref().is_none_or(str::is_empty) {
                if let Some(source_label) = sources
                    .label_of(&reference.map_source_name)
                    .filter(|l| !l.is_empty())
                {
                    label = Some(source_label.to_string());
                }
            }
        }
    }

    let layer = Layer {
        id: node_uid(tree, node, options)?,
        label,
        sources: refs,
        visible: all_visible,
        parent_id: parent_id.cloned(),
    };

    debug!(
        "layer {} [{}] visible={}",
        layer.id,
        layer.sources.iter().join(":"),
        layer.visible
    );
    Ok(layer)
}
