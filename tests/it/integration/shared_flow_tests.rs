//! Concurrent use of the shared handle.

use crate::helpers::TestFlowBuilder;
use flowcanvas::SharedFlow;
use flowcanvas::input::{FlowEvent, PointerEvent};
use flowcanvas::types::XYPosition;
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_dispatch_is_serialized() {
    let flow = SharedFlow::new(TestFlowBuilder::new().with_node("a", 0.0, 0.0).build());
    let start = flow.read().revision();
    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let seen = Arc::clone(&seen);
        flow.subscribe(move |store| seen.lock().push(store.revision()));
    }

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let flow = flow.clone();
            thread::spawn(move || {
                for j in 0..25 {
                    let size = f64::from(i * 100 + j);
                    flow.dispatch(FlowEvent::Resize {
                        width: size,
                        height: size,
                    })
                    .unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(flow.read().revision(), start + 100);
    let seen = seen.lock();
    assert_eq!(seen.len(), 100);
    assert!(seen.windows(2).all(|w| w[0] < w[1]), "listeners saw revisions out of order");
}

#[test]
fn test_readers_never_see_half_applied_drag() {
    let flow = SharedFlow::new(
        TestFlowBuilder::new()
            .with_node("a", 0.0, 0.0)
            .with_node("b", 100.0, 0.0)
            .build(),
    );
    flow.update(|store| store.set_selected(&["a", "b"], true)).unwrap();
    flow.dispatch(FlowEvent::PointerDown(PointerEvent::on_node("a", 10.0, 10.0)))
        .unwrap();

    let writer = {
        let flow = flow.clone();
        thread::spawn(move || {
            for step in 1..=50 {
                let x = 10.0 + f64::from(step);
                flow.dispatch(FlowEvent::PointerMove(PointerEvent::on_pane(x, 10.0)))
                    .unwrap();
            }
        })
    };

    // Group members always move together
    for _ in 0..200 {
        let store = flow.read();
        let a = store.node("a").unwrap().position;
        let b = store.node("b").unwrap().position;
        assert_eq!(b.x - a.x, 100.0);
    }
    writer.join().unwrap();

    let store = flow.read();
    assert_eq!(store.node("a").unwrap().position, XYPosition::new(50.0, 0.0));
}

#[test]
fn test_unsubscribed_listener_stops_receiving() {
    let flow = SharedFlow::new(TestFlowBuilder::new().build());
    let calls = Arc::new(Mutex::new(0));
    let id = {
        let calls = Arc::clone(&calls);
        flow.subscribe(move |_| *calls.lock() += 1)
    };

    flow.dispatch(FlowEvent::Reset).unwrap();
    assert!(flow.unsubscribe(id));
    flow.dispatch(FlowEvent::Reset).unwrap();

    assert_eq!(*calls.lock(), 1);
    assert!(!flow.unsubscribe(id));
}
