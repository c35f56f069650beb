//! Validation and input policies.
//!
//! Everything here is a pure lookup against the options and the event: key
//! bindings become predicates over the set of held keys, scroll input maps to
//! a [`ScrollAction`], and connection attempts are checked by
//! [`ConnectionPolicy`]. None of it holds mutable state.

use crate::config::FlowOptions;
use crate::constants::WHEEL_ZOOM_RATE;
use crate::error::ConnectionRejection;
use crate::graph::GraphStore;
use crate::types::{Connection, ConnectionMode, HandleRef, PanOnScrollMode, XYPosition};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Keys
// ============================================================================

/// Keys held down while an event fired.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeySet(BTreeSet<String>);

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn insert(&mut self, key: impl Into<String>) {
        self.0.insert(key.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// An empty binding is never held.
#[inline]
pub fn key_held(code: &str, keys: &KeySet) -> bool {
    !code.is_empty() && keys.contains(code)
}

pub fn is_delete_key<T>(options: &FlowOptions<T>, key: &str) -> bool {
    !options.delete_key_code.is_empty() && options.delete_key_code == key
}

pub fn selection_key_held<T>(options: &FlowOptions<T>, keys: &KeySet) -> bool {
    key_held(&options.selection_key_code, keys)
}

pub fn multi_selection_key_held<T>(options: &FlowOptions<T>, keys: &KeySet) -> bool {
    key_held(&options.multi_selection_key_code, keys)
}

pub fn zoom_activation_key_held<T>(options: &FlowOptions<T>, keys: &KeySet) -> bool {
    key_held(&options.zoom_activation_key_code, keys)
}

// ============================================================================
// Scroll
// ============================================================================

/// How a scroll or pinch event should move the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAction {
    Zoom,
    Pan(PanOnScrollMode),
    Ignore,
}

pub fn scroll_action<T>(options: &FlowOptions<T>, keys: &KeySet, pinch: bool) -> ScrollAction {
    if pinch {
        return if options.zoom_on_pinch {
            ScrollAction::Zoom
        } else {
            ScrollAction::Ignore
        };
    }
    if zoom_activation_key_held(options, keys) {
        ScrollAction::Zoom
    } else if options.pan_on_scroll {
        ScrollAction::Pan(options.pan_on_scroll_mode)
    } else if options.zoom_on_scroll {
        ScrollAction::Zoom
    } else {
        ScrollAction::Ignore
    }
}

/// Zoom multiplier for a wheel delta; scrolling down zooms out.
#[inline]
pub fn wheel_zoom_factor(delta_y: f64) -> f64 {
    (-delta_y * WHEEL_ZOOM_RATE).exp2()
}

/// Screen-space pan for a scroll delta, restricted to the mode's axis.
pub fn scroll_pan_delta(delta: XYPosition, mode: PanOnScrollMode, speed: f64) -> XYPosition {
    let dx = if mode == PanOnScrollMode::Vertical { 0.0 } else { -delta.x * speed };
    let dy = if mode == PanOnScrollMode::Horizontal { 0.0 } else { -delta.y * speed };
    XYPosition::new(dx, dy)
}

// ============================================================================
// Connections
// ============================================================================

/// Caller-supplied veto over otherwise valid connections.
pub type ConnectionValidator = Arc<dyn Fn(&Connection) -> bool + Send + Sync>;

/// Rules deciding whether a handle may connect to another.
#[derive(Clone, Default)]
pub struct ConnectionPolicy {
    pub mode: ConnectionMode,
    pub allow_self_connections: bool,
    pub nodes_connectable: bool,
    pub validator: Option<ConnectionValidator>,
}

impl fmt::Debug for ConnectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionPolicy")
            .field("mode", &self.mode)
            .field("allow_self_connections", &self.allow_self_connections)
            .field("nodes_connectable", &self.nodes_connectable)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

impl ConnectionPolicy {
    pub fn from_options<T>(options: &FlowOptions<T>) -> Self {
        Self {
            mode: options.connection_mode,
            allow_self_connections: options.allow_self_connections,
            nodes_connectable: options.nodes_connectable,
            validator: None,
        }
    }

    /// Whether a gesture may start from `handle`.
    pub fn can_start<T>(&self, graph: &GraphStore<T>, handle: &HandleRef) -> Result<(), ConnectionRejection> {
        let node = graph
            .node(&handle.node_id)
            .ok_or_else(|| ConnectionRejection::MissingNode(handle.node_id.clone()))?;
        if !node.is_connectable(self.nodes_connectable) {
            return Err(ConnectionRejection::NotConnectable(node.id.clone()));
        }
        Ok(())
    }

    /// Check a connection from the gesture's handle `from` to `to`, yielding
    /// the oriented connection when valid.
    pub fn check<T>(
        &self,
        graph: &GraphStore<T>,
        from: &HandleRef,
        to: &HandleRef,
    ) -> Result<Connection, ConnectionRejection> {
        self.can_start(graph, from)?;
        self.can_start(graph, to)?;

        if self.mode == ConnectionMode::Strict && from.handle_type == to.handle_type {
            return Err(ConnectionRejection::SamePolarity);
        }
        if from.node_id == to.node_id && !self.allow_self_connections {
            return Err(ConnectionRejection::SelfConnection);
        }

        let connection = Connection::between(from, to);
        if let Some(validator) = &self.validator {
            if !validator(&connection) {
                return Err(ConnectionRejection::Vetoed);
            }
        }
        Ok(connection)
    }
}
