//! Unit tests for perf module.

use crate::helpers::TestFlowBuilder;
use flowcanvas::input::FlowEvent;
use flowcanvas::perf::{ScopedTimer, measure};

#[test]
fn test_scoped_timer_drop_does_not_panic() {
    let timer = ScopedTimer::new("test_op", 10_000.0);
    assert!(timer.elapsed_ms() >= 0.0);
    drop(timer);
}

#[test]
fn test_measure_returns_result() {
    let (value, elapsed) = measure(|| 2 + 2);
    assert_eq!(value, 4);
    assert!(elapsed >= 0.0);
}

#[test]
fn test_dispatch_records_stats_per_kind() {
    let mut store = TestFlowBuilder::new().build();
    store.dispatch(FlowEvent::Resize { width: 100.0, height: 100.0 }).unwrap();
    store.dispatch(FlowEvent::Reset).unwrap();
    store.dispatch(FlowEvent::Reset).unwrap();

    let stats = store.dispatch_stats();
    assert_eq!(stats.get("resize").map(|s| s.count()), Some(1));
    assert_eq!(stats.get("reset").map(|s| s.count()), Some(2));
    assert!(stats.get("scroll").is_none());
}
