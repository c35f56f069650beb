//! Node drag gestures.

use crate::helpers::{TestFlowBuilder, assert_selected, drag_node, move_to, position_of, press, release};
use flowcanvas::input::{FlowEvent, PointerEvent};
use flowcanvas::types::{CoordinateExtent, Node, Transform, XYPosition};

#[test]
fn test_drag_delta_is_divided_by_zoom() {
    let mut store = TestFlowBuilder::new()
        .with_node("a", 0.0, 0.0)
        .with_pane(800.0, 600.0)
        .build();
    store.set_transform(Transform::new(0.0, 0.0, 2.0));

    drag_node(&mut store, "a", (20.0, 20.0), (30.0, 20.0));

    assert_eq!(position_of(&store, "a"), XYPosition::new(5.0, 0.0));
    assert!(!store.node("a").unwrap().dragging);
}

#[test]
fn test_dragging_flag_only_while_moving() {
    let mut store = TestFlowBuilder::new().with_node("a", 0.0, 0.0).build();

    press(&mut store, PointerEvent::on_node("a", 10.0, 10.0));
    assert!(!store.node("a").unwrap().dragging);
    move_to(&mut store, PointerEvent::on_node("a", 15.0, 10.0));
    assert!(store.node("a").unwrap().dragging);
    release(&mut store, PointerEvent::on_node("a", 15.0, 10.0));
    assert!(!store.node("a").unwrap().dragging);
    assert!(store.interaction().is_idle());
}

#[test]
fn test_reset_mid_drag_keeps_positions() {
    let mut store = TestFlowBuilder::new().with_node("a", 0.0, 0.0).build();

    press(&mut store, PointerEvent::on_node("a", 10.0, 10.0));
    move_to(&mut store, PointerEvent::on_node("a", 40.0, 30.0));
    store.dispatch(FlowEvent::Reset).unwrap();

    let node = store.node("a").unwrap();
    assert!(!node.dragging);
    assert_eq!(node.position, XYPosition::new(30.0, 20.0));
    assert!(store.interaction().is_idle());

    // Moves after the reset do nothing
    move_to(&mut store, PointerEvent::on_pane(200.0, 200.0));
    assert_eq!(position_of(&store, "a"), XYPosition::new(30.0, 20.0));
}

#[test]
fn test_press_selects_and_group_drags_selection() {
    let mut store = TestFlowBuilder::new()
        .with_node("a", 0.0, 0.0)
        .with_node("b", 100.0, 0.0)
        .with_node("c", 200.0, 0.0)
        .build();
    store.set_selected(&["a", "b"], true).unwrap();

    drag_node(&mut store, "a", (10.0, 10.0), (20.0, 30.0));

    assert_eq!(position_of(&store, "a"), XYPosition::new(10.0, 20.0));
    assert_eq!(position_of(&store, "b"), XYPosition::new(110.0, 20.0));
    assert_eq!(position_of(&store, "c"), XYPosition::new(200.0, 0.0));
    assert_selected(&store, &["a", "b"]);
}

#[test]
fn test_press_on_unselected_node_makes_it_sole_selection() {
    let mut store = TestFlowBuilder::new()
        .with_node("a", 0.0, 0.0)
        .with_node("b", 100.0, 0.0)
        .build();
    store.set_selected(&["a"], true).unwrap();

    drag_node(&mut store, "b", (110.0, 10.0), (120.0, 10.0));

    assert_selected(&store, &["b"]);
    assert_eq!(position_of(&store, "a"), XYPosition::new(0.0, 0.0));
    assert_eq!(position_of(&store, "b"), XYPosition::new(110.0, 0.0));
}

#[test]
fn test_multi_select_key_adds_to_selection() {
    let mut store = TestFlowBuilder::new()
        .with_node("a", 0.0, 0.0)
        .with_node("b", 100.0, 0.0)
        .build();
    store.set_selected(&["a"], true).unwrap();

    press(&mut store, PointerEvent::on_node("b", 110.0, 10.0).with_keys(["Meta"]));
    release(&mut store, PointerEvent::on_node("b", 110.0, 10.0));

    assert_selected(&store, &["a", "b"]);
}

#[test]
fn test_without_select_nodes_on_drag_only_pressed_node_moves() {
    let mut store = TestFlowBuilder::new()
        .with_node("a", 0.0, 0.0)
        .with_node("b", 100.0, 0.0)
        .with_options(|o| o.select_nodes_on_drag = false)
        .build();
    store.set_selected(&["b"], true).unwrap();

    drag_node(&mut store, "a", (10.0, 10.0), (20.0, 10.0));

    assert_eq!(position_of(&store, "a"), XYPosition::new(10.0, 0.0));
    assert_eq!(position_of(&store, "b"), XYPosition::new(100.0, 0.0));
    assert_selected(&store, &["b"]);

    // A press and release without movement is a click and selects
    press(&mut store, PointerEvent::on_node("a", 20.0, 10.0));
    assert_selected(&store, &["b"]);
    release(&mut store, PointerEvent::on_node("a", 20.0, 10.0));
    assert_selected(&store, &["a"]);
    assert_eq!(position_of(&store, "a"), XYPosition::new(10.0, 0.0));
}

#[test]
fn test_without_select_nodes_on_drag_click_variants() {
    let mut fixed: Node = Node::new("fixed", XYPosition::new(200.0, 0.0)).with_dimensions(50.0, 50.0);
    fixed.draggable = Some(false);
    let mut store = TestFlowBuilder::new()
        .with_node("a", 0.0, 0.0)
        .with_node("b", 100.0, 0.0)
        .with_element(fixed.into())
        .with_options(|o| o.select_nodes_on_drag = false)
        .build();

    // Multi-select key adds on press
    store.set_selected(&["b"], true).unwrap();
    press(&mut store, PointerEvent::on_node("a", 10.0, 10.0).with_keys(["Meta"]));
    release(&mut store, PointerEvent::on_node("a", 10.0, 10.0).with_keys(["Meta"]));
    assert_selected(&store, &["a", "b"]);

    // A node that cannot be dragged selects on press
    press(&mut store, PointerEvent::on_node("fixed", 210.0, 10.0));
    assert_selected(&store, &["fixed"]);
    release(&mut store, PointerEvent::on_node("fixed", 210.0, 10.0));
    assert_selected(&store, &["fixed"]);

    // Moving back to the press point still counts as a drag
    press(&mut store, PointerEvent::on_node("b", 110.0, 10.0));
    move_to(&mut store, PointerEvent::on_pane(120.0, 10.0));
    move_to(&mut store, PointerEvent::on_pane(110.0, 10.0));
    release(&mut store, PointerEvent::on_pane(110.0, 10.0));
    assert_selected(&store, &["fixed"]);
}

#[test]
fn test_snap_to_grid() {
    let mut store = TestFlowBuilder::new()
        .with_node("a", 0.0, 0.0)
        .with_options(|o| o.snap_to_grid = true)
        .build();

    drag_node(&mut store, "a", (10.0, 10.0), (20.0, 16.0));
    // (10, 6) rounds to the 15px grid
    assert_eq!(position_of(&store, "a"), XYPosition::new(15.0, 0.0));
}

#[test]
fn test_node_extent_clamps_drag() {
    let mut store = TestFlowBuilder::new()
        .with_node("a", 0.0, 0.0)
        .with_options(|o| o.node_extent = Some(CoordinateExtent::new([0.0, 0.0], [100.0, 100.0])))
        .build();

    drag_node(&mut store, "a", (10.0, 10.0), (500.0, -300.0));
    assert_eq!(position_of(&store, "a"), XYPosition::new(50.0, 0.0));
}

#[test]
fn test_non_draggable_node_is_selected_but_stays() {
    let mut locked: Node = Node::new("a", XYPosition::new(0.0, 0.0)).with_dimensions(50.0, 50.0);
    locked.draggable = Some(false);
    let mut store = TestFlowBuilder::new().with_element(locked.into()).build();

    drag_node(&mut store, "a", (10.0, 10.0), (60.0, 60.0));

    assert_eq!(position_of(&store, "a"), XYPosition::new(0.0, 0.0));
    assert_selected(&store, &["a"]);
}

#[test]
fn test_second_press_during_drag_is_ignored() {
    let mut store = TestFlowBuilder::new()
        .with_node("a", 0.0, 0.0)
        .with_node("b", 100.0, 0.0)
        .build();

    press(&mut store, PointerEvent::on_node("a", 10.0, 10.0));
    press(&mut store, PointerEvent::on_node("b", 110.0, 10.0));
    move_to(&mut store, PointerEvent::on_pane(20.0, 10.0));

    assert_eq!(position_of(&store, "a"), XYPosition::new(10.0, 0.0));
    assert_eq!(position_of(&store, "b"), XYPosition::new(100.0, 0.0));
    assert_selected(&store, &["a"]);
}

#[test]
fn test_press_on_unknown_node_is_not_found() {
    let mut store = TestFlowBuilder::new().build();
    let result = store.dispatch(FlowEvent::PointerDown(PointerEvent::on_node("ghost", 0.0, 0.0)));
    assert!(matches!(result, Err(flowcanvas::FlowError::NodeNotFound(_))));
    assert!(store.interaction().is_idle());
}
