//! Interaction handling - gesture tracks and intent handlers.
//!
//! The UI layer turns raw input into [`FlowEvent`]s and hands them to
//! [`crate::FlowStore::dispatch`]. Handlers read the viewport transform and
//! the policies, then mutate the graph store or the viewport.
//!
//! ## Modules
//!
//! - `state` - Per-track gesture state (`Gesture<P>`)
//! - `events` - Intent types
//! - `pointer_down` - Selection on press, gesture start
//! - `drag` - Pointer move (node drag, box stretch, pan, connection hover)
//! - `pointer_up` - Finalize gestures, create edges
//! - `transform` - Scroll, pinch and double-click zoom
//! - `keyboard` - Delete key

mod drag;
mod events;
mod keyboard;
mod pointer_down;
mod pointer_up;
mod state;
mod transform;

pub use events::{FlowEvent, KeyEvent, PointerEvent, PointerTarget, ScrollEvent};
pub use state::{BoxSelection, Gesture, InteractionState, NodeDrag, PanDrag, PendingConnection};
