//! Options parsing and normalization.

use flowcanvas::config::Loading;
use flowcanvas::types::{ConnectionMode, PanOnScrollMode};
use flowcanvas::{FlowOptions, FlowStore};

#[test]
fn test_empty_object_gives_defaults() {
    let options: FlowOptions = FlowOptions::from_json_str("{}").unwrap();
    assert_eq!(options.snap_grid, [15.0, 15.0]);
    assert_eq!(options.pan_on_scroll_speed, 0.5);
    assert_eq!(options.edge_updater_radius, 10.0);
    assert!(options.zoom_on_scroll);
    assert!(!options.pan_on_scroll);
    assert!(options.translate_extent.is_none());
}

#[test]
fn test_elements_parse_untagged() {
    let options: FlowOptions = FlowOptions::from_json_str(
        r#"{
            "elements": [
                { "id": "1", "type": "input", "position": { "x": 0, "y": 0 }, "data": { "label": "In" } },
                { "id": "2", "position": { "x": 100, "y": 100 } },
                { "id": "e1-2", "source": "1", "target": "2", "animated": true }
            ],
            "panOnScrollMode": "horizontal"
        }"#,
    )
    .unwrap();

    assert_eq!(options.elements.len(), 3);
    assert!(options.elements[0].as_node().is_some());
    assert_eq!(options.elements[1].as_node().map(|n| n.node_type.as_str()), Some("default"));
    assert!(options.elements[2].as_edge().is_some_and(|e| e.animated));
    assert_eq!(options.pan_on_scroll_mode, PanOnScrollMode::Horizontal);

    let store = FlowStore::new(options).unwrap();
    assert_eq!(store.graph().edges().len(), 1);
}

#[test]
fn test_malformed_json_is_json_error() {
    let result: Result<FlowOptions, _> = FlowOptions::from_json_str("{ nope");
    assert!(matches!(result, Err(flowcanvas::FlowError::Json(_))));
}

#[test]
fn test_unknown_node_type_falls_back_on_load() {
    let options: FlowOptions = FlowOptions::from_json_str(
        r#"{ "elements": [ { "id": "x", "type": "sparkly", "position": { "x": 0, "y": 0 } } ] }"#,
    )
    .unwrap();
    let store = FlowStore::new(options).unwrap();
    assert_eq!(store.node("x").unwrap().node_type, "default");
}

#[test]
fn test_custom_type_registered() {
    let options: FlowOptions = FlowOptions::from_json_str(
        r#"{ "nodeTypes": ["default", "sparkly"],
             "elements": [ { "id": "x", "type": "sparkly", "position": { "x": 0, "y": 0 } } ] }"#,
    )
    .unwrap();
    let store = FlowStore::new(options).unwrap();
    assert_eq!(store.node("x").unwrap().node_type, "sparkly");
}

#[test]
fn test_pass_through_options_survive() {
    let options: FlowOptions = FlowOptions::from_json_str(
        r#"{ "storageKey": "flow-1", "loading": true, "connectionMode": "loose",
             "connectionLineStyle": { "stroke": "red" } }"#,
    )
    .unwrap();
    assert_eq!(options.storage_key.as_deref(), Some("flow-1"));
    assert_eq!(options.loading, Loading::Flag(true));
    assert_eq!(options.connection_mode, ConnectionMode::Loose);
    assert!(options.connection_line_style.is_some());
}

#[test]
fn test_negative_zoom_bounds_normalized() {
    let options: FlowOptions = FlowOptions::from_json_str(r#"{ "minZoom": -1, "maxZoom": 0 }"#)
        .unwrap()
        .normalized();
    assert_eq!(options.min_zoom, 0.5);
    assert_eq!(options.max_zoom, 2.0);
}
