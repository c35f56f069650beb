//! Core types for the flow engine.
//!
//! This module defines the data model shared by every layer: positions and
//! boxes, the viewport transform, nodes, edges, connections and the export
//! object. All of it serializes with camelCase names so the exported shape
//! can be fed straight back into [`crate::FlowOptions`].

use crate::constants::DEFAULT_TYPE;
use serde::{Deserialize, Serialize};

/// Identity of a node or edge.
pub type ElementId = String;

// ============================================================================
// Geometry Primitives
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct XYPosition {
    pub x: f64,
    pub y: f64,
}

impl XYPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box stored as two corners (`x, y` and `x2, y2`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, x2: f64, y2: f64) -> Self {
        Self { x, y, x2, y2 }
    }
}

/// Axis-aligned rectangle stored as origin plus extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Rectangle bounding either viewport translation or node placement,
/// as `[[min_x, min_y], [max_x, max_y]]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateExtent(pub [[f64; 2]; 2]);

impl CoordinateExtent {
    pub const fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self([min, max])
    }

    pub fn min(&self) -> XYPosition {
        XYPosition::new(self.0[0][0], self.0[0][1])
    }

    pub fn max(&self) -> XYPosition {
        XYPosition::new(self.0[1][0], self.0[1][1])
    }
}

/// The screen <-> graph mapping: translate x, translate y, zoom.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Transform {
    pub const fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// Public name used by the imperative `set_transform` API.
pub type FlowTransform = Transform;

/// Transient screen-space box drawn during a box-selection gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub draw: bool,
}

impl SelectionRect {
    pub fn starting_at(pos: XYPosition) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width: 0.0,
            height: 0.0,
            start_x: pos.x,
            start_y: pos.y,
            draw: true,
        }
    }

    /// Stretch the rect from its start corner to `pos`.
    pub fn extend_to(&mut self, pos: XYPosition) {
        self.x = self.start_x.min(pos.x);
        self.y = self.start_y.min(pos.y);
        self.width = (pos.x - self.start_x).abs();
        self.height = (pos.y - self.start_y).abs();
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ============================================================================
// Tags
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Top,
    Right,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleType {
    Source,
    Target,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowHeadType {
    Arrow,
    #[serde(rename = "arrowclosed")]
    ArrowClosed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionLineType {
    #[default]
    Bezier,
    Straight,
    Step,
    #[serde(rename = "smoothstep")]
    SmoothStep,
}

/// Rule for which handle pairs may be connected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMode {
    /// Source handles connect only to target handles
    #[default]
    Strict,
    /// Any handle connects to any handle
    Loose,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanOnScrollMode {
    #[default]
    Free,
    Vertical,
    Horizontal,
}

// ============================================================================
// Elements
// ============================================================================

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn default_target_position() -> Position {
    Position::Top
}

fn default_source_position() -> Position {
    Position::Bottom
}

/// A positioned node in graph space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node<T = serde_json::Value> {
    pub id: ElementId,
    pub position: XYPosition,
    /// Measured size, unknown until the renderer reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(rename = "type", default = "default_type")]
    pub node_type: String,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
    /// Set only while a drag gesture is moving this node
    #[serde(default, skip_serializing_if = "is_false")]
    pub dragging: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draggable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectable: Option<bool>,
    #[serde(default = "default_target_position")]
    pub target_position: Position,
    #[serde(default = "default_source_position")]
    pub source_position: Position,
}

impl<T> Node<T> {
    pub fn new(id: impl Into<ElementId>, position: XYPosition) -> Self {
        Self {
            id: id.into(),
            position,
            dimensions: None,
            node_type: default_type(),
            data: None,
            selected: false,
            dragging: false,
            hidden: false,
            draggable: None,
            selectable: None,
            connectable: None,
            target_position: default_target_position(),
            source_position: default_source_position(),
        }
    }

    pub fn with_dimensions(mut self, width: f64, height: f64) -> Self {
        self.dimensions = Some(Dimensions::new(width, height));
        self
    }

    pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = node_type.into();
        self
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Per-node flag overrides; `None` follows the store-wide option.
    pub fn is_draggable(&self, default: bool) -> bool {
        self.draggable.unwrap_or(default)
    }

    pub fn is_selectable(&self, default: bool) -> bool {
        self.selectable.unwrap_or(default)
    }

    pub fn is_connectable(&self, default: bool) -> bool {
        self.connectable.unwrap_or(default)
    }

    /// Graph-space rect; unmeasured nodes are a point at their position.
    pub fn rect(&self) -> Rect {
        let dims = self.dimensions.unwrap_or_default();
        Rect::new(self.position.x, self.position.y, dims.width, dims.height)
    }
}

/// A connection between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge<T = serde_json::Value> {
    pub id: ElementId,
    pub source: ElementId,
    pub target: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(rename = "type", default = "default_type")]
    pub edge_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Opaque style payload handed to the renderer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow_head_type: Option<ArrowHeadType>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub animated: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Edge<T> {
    pub fn new(
        id: impl Into<ElementId>,
        source: impl Into<ElementId>,
        target: impl Into<ElementId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            edge_type: default_type(),
            label: None,
            style: None,
            arrow_head_type: None,
            animated: false,
            hidden: false,
            selected: false,
            data: None,
        }
    }

    /// Build an edge from a completed connection, using the generated id.
    pub fn from_connection(connection: &Connection) -> Self {
        let mut edge = Self::new(connection.edge_id(), connection.source.clone(), connection.target.clone());
        edge.source_handle = connection.source_handle.clone();
        edge.target_handle = connection.target_handle.clone();
        edge
    }

    pub fn with_handles(mut self, source: Option<&str>, target: Option<&str>) -> Self {
        self.source_handle = source.map(str::to_string);
        self.target_handle = target.map(str::to_string);
        self
    }

    pub fn with_type(mut self, edge_type: impl Into<String>) -> Self {
        self.edge_type = edge_type.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

    /// Same endpoints and handles, ignoring id and payload.
    pub fn same_route<U>(&self, other: &Edge<U>) -> bool {
        self.source == other.source
            && self.target == other.target
            && self.source_handle == other.source_handle
            && self.target_handle == other.target_handle
    }
}

/// A named connection point on a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleRef {
    pub node_id: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_id: Option<String>,
    pub handle_type: HandleType,
}

impl HandleRef {
    pub fn new(node_id: impl Into<ElementId>, handle_id: Option<&str>, handle_type: HandleType) -> Self {
        Self {
            node_id: node_id.into(),
            handle_id: handle_id.map(str::to_string),
            handle_type,
        }
    }

    pub fn source(node_id: impl Into<ElementId>) -> Self {
        Self::new(node_id, None, HandleType::Source)
    }

    pub fn target(node_id: impl Into<ElementId>) -> Self {
        Self::new(node_id, None, HandleType::Target)
    }
}

/// A requested edge, before it becomes part of the graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: ElementId,
    pub source_handle: Option<String>,
    pub target: ElementId,
    pub target_handle: Option<String>,
}

impl Connection {
    /// Orient a handle pair so that a gesture started on a target handle
    /// still yields `source -> target`.
    pub fn between(from: &HandleRef, to: &HandleRef) -> Self {
        let (source, target) = match from.handle_type {
            HandleType::Source => (from, to),
            HandleType::Target => (to, from),
        };
        Self {
            source: source.node_id.clone(),
            source_handle: source.handle_id.clone(),
            target: target.node_id.clone(),
            target_handle: target.handle_id.clone(),
        }
    }

    pub fn edge_id(&self) -> ElementId {
        format!(
            "{}{}{}-{}{}",
            crate::constants::EDGE_ID_PREFIX,
            self.source,
            self.source_handle.as_deref().unwrap_or(""),
            self.target,
            self.target_handle.as_deref().unwrap_or("")
        )
    }
}

/// Either kind of graph element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlowElement<T = serde_json::Value> {
    Node(Node<T>),
    Edge(Edge<T>),
}

impl<T> FlowElement<T> {
    pub fn id(&self) -> &str {
        match self {
            Self::Node(node) => &node.id,
            Self::Edge(edge) => &edge.id,
        }
    }

    pub fn as_node(&self) -> Option<&Node<T>> {
        match self {
            Self::Node(node) => Some(node),
            Self::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge<T>> {
        match self {
            Self::Edge(edge) => Some(edge),
            Self::Node(_) => None,
        }
    }
}

impl<T> From<Node<T>> for FlowElement<T> {
    fn from(node: Node<T>) -> Self {
        Self::Node(node)
    }
}

impl<T> From<Edge<T>> for FlowElement<T> {
    fn from(edge: Edge<T>) -> Self {
        Self::Edge(edge)
    }
}

// ============================================================================
// Imperative API Payloads
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FitViewParams {
    /// Fraction of the target rect added as margin; defaults to 0.1
    pub padding: Option<f64>,
    pub include_hidden_nodes: bool,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
}

impl FitViewParams {
    pub fn with_padding(padding: f64) -> Self {
        Self {
            padding: Some(padding),
            ..Self::default()
        }
    }
}

/// Canonical export shape, accepted back by [`crate::FlowStore::load_object`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowExportObject<T = serde_json::Value> {
    pub elements: Vec<FlowElement<T>>,
    pub position: [f64; 2],
    pub zoom: f64,
}
