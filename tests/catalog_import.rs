mod common;

use std::collections::HashSet;

use common::{ReplayStore, init_logging};
use layercat::sources::MapSource;
use layercat::{
    Action, CatalogImporter, Document, Layer, MapSourceRegistry, SequentialUids, SourceRef,
    import_catalog_str, parse_catalog,
};
use pretty_assertions::assert_eq;

const MAPBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<mapbook>
    <map-source name="streets" title="City Streets">
        <layer name="major" status="on"/>
        <layer name="minor" status="off"/>
    </map-source>
    <map-source name="aerial" title="Aerial Photos">
        <layer name="2020" status="on"/>
    </map-source>
    <map-source name="rivers">
        <layer name="all" status="on"/>
    </map-source>
    <map-source name="lakes" title="Lakes">
        <layer name="all" status="on"/>
    </map-source>

    <catalog>
        <group title="Base maps" expand="true" multiple="false">
            <layer title="Streets" src="streets/major"/>
            <layer src="aerial/2020"/>
        </group>
        <group title="Overlays">
            <group title="Hydrology">
                <layer src="rivers/all:lakes/all"/>
            </group>
            <layer title="All streets" src="streets/major:streets/minor"/>
            <tool name="identify"/>
        </group>
        <layer title="Sketch"/>
    </catalog>
</mapbook>"#;

fn import_mapbook() -> (Document, Vec<Action>) {
    init_logging();
    let mut doc: Document = MAPBOOK.parse().unwrap();
    let registry = MapSourceRegistry::from_document(&doc);
    let catalog = doc.find_first("catalog").unwrap();
    let actions = CatalogImporter::new()
        .import_at(&mut doc, catalog, &registry)
        .unwrap();
    (doc, actions)
}

fn layers(actions: &[Action]) -> Vec<&Layer> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::CreateLayer { entity } => Some(entity),
            _ => None,
        })
        .collect()
}

#[test]
fn test_mapbook_rebuilds_in_one_pass() {
    let (_, actions) = import_mapbook();
    let store = ReplayStore::replay(&actions);

    assert_eq!(
        store.render(),
        vec![
            r#"group Some("Base maps") expand=true multiple=false"#,
            r#"  layer Some("Streets") ["streets/major"] visible=true"#,
            r#"  layer Some("Aerial Photos") ["aerial/2020"] visible=true"#,
            r#"group Some("Overlays") expand=false multiple=true"#,
            r#"  group Some("Hydrology") expand=false multiple=true"#,
            r#"    layer Some("Lakes") ["rivers/all", "lakes/all"] visible=true"#,
            r#"  layer Some("All streets") ["streets/major", "streets/minor"] visible=false"#,
            r#"layer Some("Sketch") [] visible=true"#,
        ]
    );
}

#[test]
fn test_ids_are_unique_and_match_document() {
    let (doc, actions) = import_mapbook();
    let created: Vec<&str> = actions
        .iter()
        .filter_map(Action::created_id)
        .map(|id| id.as_str())
        .collect();

    let unique: HashSet<&str> = created.iter().copied().collect();
    assert_eq!(unique.len(), created.len());

    let in_doc: HashSet<&str> = doc.ids().filter_map(|n| doc.attribute(n, "uuid")).collect();
    assert_eq!(in_doc.len(), doc.len());
    assert!(unique.is_subset(&in_doc));
}

#[test]
fn test_one_link_per_entity() {
    let (_, actions) = import_mapbook();
    let creates = actions.iter().filter(|a| !a.is_link()).count();
    let links = actions.iter().filter(|a| a.is_link()).count();
    assert_eq!(creates, 8);
    assert_eq!(links, creates);
}

#[test]
fn test_top_level_entities_have_no_parent() {
    let (_, actions) = import_mapbook();
    let store = ReplayStore::replay(&actions);
    assert_eq!(store.roots.len(), 3);
    for id in &store.roots {
        let parent = store
            .groups
            .get(id)
            .map(|g| g.parent_id.clone())
            .or_else(|| store.layers.get(id).map(|l| l.parent_id.clone()))
            .unwrap();
        assert_eq!(parent, None);
    }
}

#[test]
fn test_two_sources_visibility_and_refs() {
    let mut doc: Document = r#"<catalog><layer src="A/x:B"/></catalog>"#.parse().unwrap();
    let mut registry = MapSourceRegistry::new();
    registry.insert(MapSource::new("A").with_layer("x", true));
    registry.insert(MapSource::new("B").with_visible(false));

    let actions = parse_catalog(&mut doc, &registry).unwrap();
    let layer = layers(&actions)[0];
    assert_eq!(
        layer.sources,
        vec![SourceRef::new("A", Some("x")), SourceRef::new("B", None)]
    );
    assert!(!layer.visible);

    registry.insert(MapSource::new("B"));
    let actions = parse_catalog(&mut doc, &registry).unwrap();
    assert!(layers(&actions)[0].visible);
}

#[test]
fn test_first_labelled_source_wins() {
    let xml = r#"<catalog><layer src="A:B"/></catalog>"#;

    let mut registry = MapSourceRegistry::new();
    registry.insert(MapSource::new("A"));
    registry.insert(MapSource::new("B").with_label("Roads"));
    let actions = import_catalog_str(xml, &registry).unwrap();
    assert_eq!(layers(&actions)[0].label.as_deref(), Some("Roads"));

    registry.insert(MapSource::new("A").with_label("Rivers"));
    let actions = import_catalog_str(xml, &registry).unwrap();
    assert_eq!(layers(&actions)[0].label.as_deref(), Some("Rivers"));
}

#[test]
fn test_unknown_source_hides_layer_without_failing() {
    let actions = import_catalog_str(
        r#"<catalog><layer title="Ghost" src="missing/layer"/></catalog>"#,
        &MapSourceRegistry::new(),
    )
    .unwrap();
    let layer = layers(&actions)[0];
    assert!(!layer.visible);
    assert_eq!(layer.label.as_deref(), Some("Ghost"));
}

#[test]
fn test_reimport_is_isomorphic_with_fresh_ids() {
    let registry = MapSourceRegistry::from_document(&MAPBOOK.parse().unwrap());
    let first = import_catalog_str(MAPBOOK, &registry).unwrap();
    let second = import_catalog_str(MAPBOOK, &registry).unwrap();

    assert_eq!(
        ReplayStore::replay(&first).render(),
        ReplayStore::replay(&second).render()
    );

    let ids = |actions: &[Action]| -> HashSet<String> {
        actions
            .iter()
            .filter_map(Action::created_id)
            .map(|id| id.to_string())
            .collect()
    };
    assert!(ids(&first).is_disjoint(&ids(&second)));
}

#[test]
fn test_deterministic_ids_give_identical_streams() {
    let registry = MapSourceRegistry::new();
    let run = || {
        let mut doc: Document = MAPBOOK.parse().unwrap();
        let catalog = doc.find_first("catalog").unwrap();
        CatalogImporter::new()
            .with_generator(SequentialUids::new("cat"))
            .import_at(&mut doc, catalog, &registry)
            .unwrap()
    };
    let first = run();
    assert_eq!(first.len(), 16);
    assert_eq!(first, run());
}

#[test]
fn test_unknown_kind_does_not_disturb_siblings() {
    let with_tool = r#"<catalog><layer title="a"/><tool/><layer title="b"/></catalog>"#;
    let without = r#"<catalog><layer title="a"/><layer title="b"/></catalog>"#;
    let registry = MapSourceRegistry::new();

    let a = import_catalog_str(with_tool, &registry).unwrap();
    let b = import_catalog_str(without, &registry).unwrap();
    assert_eq!(a.len(), 4);
    assert_eq!(
        ReplayStore::replay(&a).render(),
        ReplayStore::replay(&b).render()
    );
}

#[test]
fn test_actions_serialize_for_the_store() {
    let mut doc: Document = r#"<catalog><group title="G"><layer title="L"/></group></catalog>"#
        .parse()
        .unwrap();
    let actions = CatalogImporter::new()
        .with_generator(SequentialUids::new("id"))
        .import(&mut doc, &MapSourceRegistry::new())
        .unwrap();

    let json = serde_json::to_value(&actions).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"type": "CREATE_GROUP", "entity": {
                "id": "id-1", "label": "G", "expand": false, "multiple": true, "children": []
            }},
            {"type": "CREATE_LAYER", "entity": {
                "id": "id-2", "label": "L", "sources": [], "visible": true, "parentId": "id-1"
            }},
            {"type": "LINK_CHILD", "parentId": "id-1", "childId": "id-2"},
            {"type": "LINK_CHILD", "parentId": null, "childId": "id-1"}
        ])
    );
}

#[test]
fn test_import_below_a_group_replays() {
    let mut doc: Document = MAPBOOK.parse().unwrap();
    let registry = MapSourceRegistry::from_document(&doc);
    let overlays = doc
        .find_all("group")
        .find(|g| doc.attribute(*g, "title") == Some("Overlays"))
        .unwrap();

    let actions = CatalogImporter::new()
        .import_at(&mut doc, overlays, &registry)
        .unwrap();
    let store = ReplayStore::replay(&actions);

    assert_eq!(
        store.render(),
        vec![
            r#"group Some("Hydrology") expand=false multiple=true"#,
            r#"  layer Some("Lakes") ["rivers/all", "lakes/all"] visible=true"#,
            r#"layer Some("All streets") ["streets/major", "streets/minor"] visible=false"#,
        ]
    );
}
