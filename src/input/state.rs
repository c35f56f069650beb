//! Gesture tracks - one explicit state machine per kind of interaction.
//!
//! Each track is a [`Gesture`]: `Idle` or `Active` with the data the gesture
//! needs. Tracks are independent, so a node drag and a connection can never
//! share half-initialized fields.
//!
//! ## Transitions
//!
//! ```text
//! node_drag:  Idle -> Active  (pointer down on a draggable node)
//! selection:  Idle -> Active  (pointer down on pane + selection key / selectionOnDrag)
//! pan:        Idle -> Active  (pointer down on pane otherwise, paneMoveable)
//! connection: Idle -> Active  (pointer down on a handle of a connectable node)
//!
//! Any -> Idle                 (pointer up, or Reset)
//! ```

use crate::types::{ElementId, HandleRef, SelectionRect, XYPosition};
use std::collections::HashSet;

/// One interaction track.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture<P> {
    Idle,
    Active(P),
}

impl<P> Default for Gesture<P> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<P> Gesture<P> {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn active(&self) -> Option<&P> {
        match self {
            Self::Active(p) => Some(p),
            Self::Idle => None,
        }
    }

    pub fn active_mut(&mut self) -> Option<&mut P> {
        match self {
            Self::Active(p) => Some(p),
            Self::Idle => None,
        }
    }

    /// Activate the track. Returns false, leaving the running gesture
    /// untouched, if it was already active.
    pub fn start(&mut self, payload: P) -> bool {
        if self.is_active() {
            return false;
        }
        *self = Self::Active(payload);
        true
    }

    /// Return to `Idle`, handing back the finished gesture.
    pub fn finish(&mut self) -> Option<P> {
        match std::mem::take(self) {
            Self::Active(p) => Some(p),
            Self::Idle => None,
        }
    }
}

/// Nodes being moved by a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDrag {
    /// Graph-space pointer position at press
    pub origin: XYPosition,
    /// Each moving node with its position at press
    pub nodes: Vec<(ElementId, XYPosition)>,
    /// Pressed node the press itself did not select; selected on a click
    pub select_on_release: Option<ElementId>,
    pub moved: bool,
}

/// A box selection in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSelection {
    pub rect: SelectionRect,
    /// Selection at press, kept when the multi-select key is held on release
    pub prior: HashSet<ElementId>,
}

/// A connection being dragged out of a handle.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConnection {
    pub from: HandleRef,
    /// Cursor in graph space
    pub position: XYPosition,
    /// Handle under the cursor that would accept the connection
    pub candidate: Option<HandleRef>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanDrag {
    /// Screen-space pointer position of the previous event
    pub last_pos: XYPosition,
}

/// All gesture tracks of a store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub node_drag: Gesture<NodeDrag>,
    pub selection: Gesture<BoxSelection>,
    pub connection: Gesture<PendingConnection>,
    pub pan: Gesture<PanDrag>,
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        !(self.node_drag.is_active()
            || self.selection.is_active()
            || self.connection.is_active()
            || self.pan.is_active())
    }

    /// Cancel every track.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
