//! Interaction intents dispatched by the UI layer.
//!
//! Positions are screen space (relative to the pane). Every pointer, scroll
//! and key event carries the set of keys held when it fired, so handlers
//! never depend on a separately tracked keyboard state.

use crate::policy::KeySet;
use crate::types::{Dimensions, ElementId, HandleRef, XYPosition};

/// What the pointer was over when the event fired.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    Pane,
    Node(ElementId),
    Edge(ElementId),
    Handle(HandleRef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub position: XYPosition,
    pub target: PointerTarget,
    pub keys: KeySet,
}

impl PointerEvent {
    pub fn new(position: XYPosition, target: PointerTarget) -> Self {
        Self {
            position,
            target,
            keys: KeySet::default(),
        }
    }

    pub fn on_pane(x: f64, y: f64) -> Self {
        Self::new(XYPosition::new(x, y), PointerTarget::Pane)
    }

    pub fn on_node(id: impl Into<ElementId>, x: f64, y: f64) -> Self {
        Self::new(XYPosition::new(x, y), PointerTarget::Node(id.into()))
    }

    pub fn on_handle(handle: HandleRef, x: f64, y: f64) -> Self {
        Self::new(XYPosition::new(x, y), PointerTarget::Handle(handle))
    }

    pub fn with_keys<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.keys = keys.into_iter().collect();
        self
    }
}

/// Wheel, trackpad scroll or pinch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollEvent {
    /// Pointer position, the focal point for zoom
    pub position: XYPosition,
    pub delta: XYPosition,
    /// Trackpad pinch rather than scroll
    pub pinch: bool,
    pub keys: KeySet,
}

impl ScrollEvent {
    pub fn new(position: XYPosition, delta: XYPosition) -> Self {
        Self {
            position,
            delta,
            pinch: false,
            keys: KeySet::default(),
        }
    }

    pub fn pinch(mut self) -> Self {
        self.pinch = true;
        self
    }

    pub fn with_keys<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.keys = keys.into_iter().collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    pub key: String,
    pub keys: KeySet,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            keys: KeySet::default(),
        }
    }
}

/// Everything the store reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    Scroll(ScrollEvent),
    DoubleClick(PointerEvent),
    KeyDown(KeyEvent),
    /// Cancel every gesture in progress
    Reset,
    /// Pane size reported by the renderer
    Resize { width: f64, height: f64 },
    /// Node size reported by the renderer after layout
    NodeMeasured { id: ElementId, dimensions: Dimensions },
}

impl FlowEvent {
    /// Short name used for logging and dispatch timings.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PointerDown(_) => "pointerDown",
            Self::PointerMove(_) => "pointerMove",
            Self::PointerUp(_) => "pointerUp",
            Self::Scroll(_) => "scroll",
            Self::DoubleClick(_) => "doubleClick",
            Self::KeyDown(_) => "keyDown",
            Self::Reset => "reset",
            Self::Resize { .. } => "resize",
            Self::NodeMeasured { .. } => "nodeMeasured",
        }
    }
}
