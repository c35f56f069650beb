//! Connection gestures from handle press to edge creation.

use crate::helpers::{TestFlowBuilder, move_to, press, release};
use flowcanvas::error::ConnectionRejection;
use flowcanvas::input::{FlowEvent, PointerEvent};
use flowcanvas::types::{Connection, ConnectionMode, HandleRef, HandleType, Node, XYPosition};
use flowcanvas::{FlowError, FlowStore};

fn pair() -> FlowStore {
    TestFlowBuilder::new()
        .with_node("a", 0.0, 0.0)
        .with_node("b", 200.0, 0.0)
        .build()
}

fn release_on(store: &mut FlowStore, handle: HandleRef) -> Result<(), FlowError> {
    store.dispatch(FlowEvent::PointerUp(PointerEvent::on_handle(handle, 200.0, 0.0)))
}

#[test]
fn test_source_to_target_creates_edge() {
    let mut store = pair();

    press(&mut store, PointerEvent::on_handle(HandleRef::source("a"), 25.0, 50.0));
    assert!(store.connection().is_some());
    release_on(&mut store, HandleRef::target("b")).unwrap();

    let edge = store.edge("flow__edge-a-b").expect("edge created");
    assert_eq!((edge.source.as_str(), edge.target.as_str()), ("a", "b"));
    assert!(store.connection().is_none());
}

#[test]
fn test_pending_connection_follows_cursor_in_graph_space() {
    let mut store = pair();
    store.set_transform(flowcanvas::Transform::new(10.0, 20.0, 2.0));

    press(&mut store, PointerEvent::on_handle(HandleRef::source("a"), 60.0, 120.0));
    move_to(&mut store, PointerEvent::on_pane(110.0, 220.0));

    let pending = store.connection().expect("connection active");
    assert_eq!(pending.from, HandleRef::source("a"));
    assert_eq!(pending.position, XYPosition::new(50.0, 100.0));
    assert!(pending.candidate.is_none());
}

#[test]
fn test_hover_reports_valid_candidate_only() {
    let mut store = pair();
    press(&mut store, PointerEvent::on_handle(HandleRef::source("a"), 25.0, 50.0));

    move_to(&mut store, PointerEvent::on_handle(HandleRef::target("b"), 225.0, 0.0));
    assert_eq!(
        store.connection().and_then(|c| c.candidate.clone()),
        Some(HandleRef::target("b"))
    );

    // Same polarity is not a candidate in strict mode
    move_to(&mut store, PointerEvent::on_handle(HandleRef::source("b"), 225.0, 50.0));
    assert!(store.connection().and_then(|c| c.candidate.clone()).is_none());
}

#[test]
fn test_strict_mode_rejects_same_polarity_release() {
    let mut store = pair();
    press(&mut store, PointerEvent::on_handle(HandleRef::source("a"), 25.0, 50.0));

    let result = release_on(&mut store, HandleRef::source("b"));

    assert!(matches!(
        result,
        Err(FlowError::InvalidConnection(ConnectionRejection::SamePolarity))
    ));
    assert!(store.graph().edges().is_empty());
    assert!(store.connection().is_none());
}

#[test]
fn test_loose_mode_accepts_same_polarity() {
    let mut store = TestFlowBuilder::new()
        .with_node("a", 0.0, 0.0)
        .with_node("b", 200.0, 0.0)
        .with_options(|o| *o = std::mem::take(o).with_connection_mode(ConnectionMode::Loose))
        .build();
    press(&mut store, PointerEvent::on_handle(HandleRef::source("a"), 25.0, 50.0));

    release_on(&mut store, HandleRef::source("b")).unwrap();

    assert_eq!(store.graph().edges().len(), 1);
}

#[test]
fn test_drag_from_target_handle_orients_edge() {
    let mut store = pair();
    press(
        &mut store,
        PointerEvent::on_handle(HandleRef::new("a", Some("in"), HandleType::Target), 25.0, 0.0),
    );

    release_on(&mut store, HandleRef::new("b", Some("out"), HandleType::Source)).unwrap();

    let edge = store.edge("flow__edge-bout-ain").expect("edge created");
    assert_eq!(edge.source, "b");
    assert_eq!(edge.source_handle.as_deref(), Some("out"));
    assert_eq!(edge.target, "a");
    assert_eq!(edge.target_handle.as_deref(), Some("in"));
}

#[test]
fn test_release_off_handle_discards_connection() {
    let mut store = pair();
    press(&mut store, PointerEvent::on_handle(HandleRef::source("a"), 25.0, 50.0));

    release(&mut store, PointerEvent::on_pane(400.0, 400.0));

    assert!(store.graph().edges().is_empty());
    assert!(store.interaction().is_idle());
}

#[test]
fn test_self_connection_rejected_unless_allowed() {
    let mut store = pair();
    press(&mut store, PointerEvent::on_handle(HandleRef::source("a"), 25.0, 50.0));
    let result = release_on(&mut store, HandleRef::target("a"));
    assert!(matches!(
        result,
        Err(FlowError::InvalidConnection(ConnectionRejection::SelfConnection))
    ));

    let mut store = TestFlowBuilder::new()
        .with_node("a", 0.0, 0.0)
        .with_options(|o| o.allow_self_connections = true)
        .build();
    press(&mut store, PointerEvent::on_handle(HandleRef::source("a"), 25.0, 50.0));
    release_on(&mut store, HandleRef::target("a")).unwrap();
    assert!(store.edge("flow__edge-a-a").is_some());
}

#[test]
fn test_unconnectable_node_starts_no_gesture() {
    let mut locked: Node = Node::new("locked", XYPosition::new(0.0, 0.0)).with_dimensions(50.0, 50.0);
    locked.connectable = Some(false);
    let mut store = TestFlowBuilder::new()
        .with_element(locked.into())
        .with_node("b", 200.0, 0.0)
        .build();

    press(&mut store, PointerEvent::on_handle(HandleRef::source("locked"), 25.0, 50.0));

    assert!(store.connection().is_none());
    assert!(store.interaction().is_idle());
}

#[test]
fn test_validator_vetoes_connection() {
    let mut store = pair();
    store.set_connection_validator(|c| c.target != "b");
    press(&mut store, PointerEvent::on_handle(HandleRef::source("a"), 25.0, 50.0));

    let result = release_on(&mut store, HandleRef::target("b"));

    assert!(matches!(
        result,
        Err(FlowError::InvalidConnection(ConnectionRejection::Vetoed))
    ));
    assert!(store.graph().edges().is_empty());
}

#[test]
fn test_repeated_connection_is_rejected_by_id() {
    let mut store = pair();
    for _ in 0..2 {
        press(&mut store, PointerEvent::on_handle(HandleRef::source("a"), 25.0, 50.0));
        let _ = release_on(&mut store, HandleRef::target("b"));
    }

    assert_eq!(store.graph().edges().len(), 1);
}

#[test]
fn test_source_deleted_mid_gesture_cancels_connection() {
    let mut store = pair();
    press(&mut store, PointerEvent::on_handle(HandleRef::source("a"), 25.0, 50.0));
    store.set_selected(&["a"], true).unwrap();

    store
        .dispatch(FlowEvent::KeyDown(flowcanvas::input::KeyEvent::new("Backspace")))
        .unwrap();

    assert!(store.connection().is_none());
    release_on(&mut store, HandleRef::target("b")).unwrap();
    assert!(store.graph().edges().is_empty());
}

#[test]
fn test_add_connection_applies_edge_rules() {
    let mut store = pair();
    let connection = Connection::between(&HandleRef::source("a"), &HandleRef::target("b"));

    assert_eq!(store.add_connection(&connection).unwrap(), "flow__edge-a-b");
    assert!(matches!(
        store.add_connection(&connection),
        Err(FlowError::DuplicateId(_))
    ));

    let dangling = Connection::between(&HandleRef::source("a"), &HandleRef::target("ghost"));
    assert!(matches!(
        store.add_connection(&dangling),
        Err(FlowError::DanglingEdge { .. })
    ));
}
