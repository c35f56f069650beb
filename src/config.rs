//! Store configuration.
//!
//! Every option the store accepts at initialization lives in [`FlowOptions`],
//! each with a default. Options deserialize from camelCase JSON so a host
//! can pass its configuration object straight through.
//!
//! Out-of-range values are normalized by [`FlowOptions::normalized`] rather
//! than rejected: swapped zoom bounds are reordered, a non-positive snap grid
//! falls back to the default, the default zoom is clamped into range.

use crate::constants::{
    BUILTIN_EDGE_TYPES, BUILTIN_NODE_TYPES, DEFAULT_ZOOM, DELETE_KEY, EDGE_UPDATER_RADIUS, MAX_ZOOM,
    MIN_ZOOM, MULTI_SELECTION_KEY, PAN_ON_SCROLL_SPEED, SELECTION_KEY, SNAP_GRID, ZOOM_ACTIVATION_KEY,
};
use crate::error::FlowResult;
use crate::types::{ConnectionLineType, ConnectionMode, CoordinateExtent, FlowElement, PanOnScrollMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// Name of a key as reported by the host (`"Shift"`, `"Meta"`, `"Backspace"`).
pub type KeyCode = String;

/// Loading indicator handed to the renderer untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Loading {
    Flag(bool),
    Descriptor(LoadingDescriptor),
}

impl Default for Loading {
    fn default() -> Self {
        Self::Flag(false)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingDescriptor {
    pub label: String,
    pub transition: Option<serde_json::Value>,
    pub style: Option<serde_json::Value>,
    pub class: String,
}

/// Initialization options for a [`crate::FlowStore`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowOptions<T = serde_json::Value> {
    /// Store identity; a random UUID when absent
    pub id: Option<String>,
    /// Initial nodes and edges
    pub elements: Vec<FlowElement<T>>,
    /// Registered node type tags; others fall back to `"default"`
    pub node_types: BTreeSet<String>,
    /// Registered edge type tags; others fall back to `"default"`
    pub edge_types: BTreeSet<String>,

    pub connection_mode: ConnectionMode,
    pub connection_line_type: ConnectionLineType,
    pub connection_line_style: Option<serde_json::Value>,
    /// Allow a connection whose source and target are the same node
    pub allow_self_connections: bool,
    /// Reject a second edge with the same endpoints and handles
    pub prevent_duplicate_edges: bool,

    pub delete_key_code: KeyCode,
    pub selection_key_code: KeyCode,
    pub multi_selection_key_code: KeyCode,
    pub zoom_activation_key_code: KeyCode,

    pub snap_to_grid: bool,
    pub snap_grid: [f64; 2],
    /// Cull `render_nodes` to the visible rect
    pub only_render_visible_elements: bool,

    pub nodes_draggable: bool,
    pub nodes_connectable: bool,
    pub elements_selectable: bool,
    pub select_nodes_on_drag: bool,
    /// Pane drag draws a selection box without the selection key
    pub selection_on_drag: bool,
    pub pane_moveable: bool,

    pub min_zoom: f64,
    pub max_zoom: f64,
    pub default_zoom: f64,
    pub default_position: [f64; 2],
    /// `None` leaves the viewport unbounded
    pub translate_extent: Option<CoordinateExtent>,
    /// `None` leaves node placement unbounded
    pub node_extent: Option<CoordinateExtent>,

    pub zoom_on_scroll: bool,
    pub zoom_on_pinch: bool,
    pub pan_on_scroll: bool,
    pub pan_on_scroll_speed: f64,
    pub pan_on_scroll_mode: PanOnScrollMode,
    pub zoom_on_double_click: bool,

    pub edge_updater_radius: f64,
    /// Opaque key for the external persistence layer
    pub storage_key: Option<String>,
    pub loading: Loading,
}

impl<T> Default for FlowOptions<T> {
    fn default() -> Self {
        Self {
            id: None,
            elements: Vec::new(),
            node_types: BUILTIN_NODE_TYPES.iter().map(|s| s.to_string()).collect(),
            edge_types: BUILTIN_EDGE_TYPES.iter().map(|s| s.to_string()).collect(),
            connection_mode: ConnectionMode::default(),
            connection_line_type: ConnectionLineType::default(),
            connection_line_style: None,
            allow_self_connections: false,
            prevent_duplicate_edges: false,
            delete_key_code: DELETE_KEY.to_string(),
            selection_key_code: SELECTION_KEY.to_string(),
            multi_selection_key_code: MULTI_SELECTION_KEY.to_string(),
            zoom_activation_key_code: ZOOM_ACTIVATION_KEY.to_string(),
            snap_to_grid: false,
            snap_grid: SNAP_GRID,
            only_render_visible_elements: false,
            nodes_draggable: true,
            nodes_connectable: true,
            elements_selectable: true,
            select_nodes_on_drag: true,
            selection_on_drag: false,
            pane_moveable: true,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            default_zoom: DEFAULT_ZOOM,
            default_position: [0.0, 0.0],
            translate_extent: None,
            node_extent: None,
            zoom_on_scroll: true,
            zoom_on_pinch: true,
            pan_on_scroll: false,
            pan_on_scroll_speed: PAN_ON_SCROLL_SPEED,
            pan_on_scroll_mode: PanOnScrollMode::default(),
            zoom_on_double_click: true,
            edge_updater_radius: EDGE_UPDATER_RADIUS,
            storage_key: None,
            loading: Loading::default(),
        }
    }
}

impl<T> FlowOptions<T> {
    pub fn with_elements(mut self, elements: Vec<FlowElement<T>>) -> Self {
        self.elements = elements;
        self
    }

    pub fn with_zoom_range(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    pub fn with_connection_mode(mut self, mode: ConnectionMode) -> Self {
        self.connection_mode = mode;
        self
    }

    /// Bring every option into its valid range.
    pub fn normalized(mut self) -> Self {
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            warn!(min_zoom = self.min_zoom, "Invalid minZoom, using default");
            self.min_zoom = MIN_ZOOM;
        }
        if !(self.max_zoom.is_finite() && self.max_zoom > 0.0) {
            warn!(max_zoom = self.max_zoom, "Invalid maxZoom, using default");
            self.max_zoom = MAX_ZOOM.max(self.min_zoom);
        }
        if self.min_zoom > self.max_zoom {
            warn!(min_zoom = self.min_zoom, max_zoom = self.max_zoom, "Zoom bounds swapped");
            std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }
        if !self.default_zoom.is_finite() {
            self.default_zoom = DEFAULT_ZOOM;
        }
        self.default_zoom = self.default_zoom.clamp(self.min_zoom, self.max_zoom);

        if self.snap_grid.iter().any(|g| !(g.is_finite() && *g > 0.0)) {
            warn!(snap_grid = ?self.snap_grid, "Invalid snapGrid, using default");
            self.snap_grid = SNAP_GRID;
        }
        if !(self.pan_on_scroll_speed.is_finite() && self.pan_on_scroll_speed >= 0.0) {
            self.pan_on_scroll_speed = PAN_ON_SCROLL_SPEED;
        }
        self.translate_extent = self.translate_extent.map(ordered_extent);
        self.node_extent = self.node_extent.map(ordered_extent);
        self
    }
}

impl<T: serde::de::DeserializeOwned> FlowOptions<T> {
    /// Parse options from a JSON object; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> FlowResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn ordered_extent(extent: CoordinateExtent) -> CoordinateExtent {
    let [[x1, y1], [x2, y2]] = extent.0;
    CoordinateExtent::new([x1.min(x2), y1.min(y2)], [x1.max(x2), y1.max(y2)])
}
