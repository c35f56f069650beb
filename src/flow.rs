//! The flow store - graph, viewport and interaction state behind one API.
//!
//! [`FlowStore`] is the aggregate a renderer reads and a UI layer drives. It
//! is created from [`FlowOptions`], mutated by [`FlowStore::dispatch`] and the
//! imperative methods (zoom, fit view, load/export), and bumps
//! [`FlowStore::revision`] on every applied change so observers can cheaply
//! detect updates.

use crate::config::FlowOptions;
use crate::error::FlowResult;
use crate::geometry::get_rect_of_nodes;
use crate::graph::{EdgeRules, GraphStore, TypeRegistry};
use crate::input::{FlowEvent, InteractionState, PendingConnection};
use crate::perf::{DispatchStats, measure};
use crate::policy::ConnectionPolicy;
use crate::types::{
    Connection, Edge, ElementId, FitViewParams, FlowElement, FlowExportObject, Node, SelectionRect, Transform,
    XYPosition,
};
use crate::viewport::Viewport;
use std::collections::HashSet;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug)]
pub struct FlowStore<T = serde_json::Value> {
    id: String,
    pub(crate) options: FlowOptions<T>,
    pub(crate) graph: GraphStore<T>,
    pub(crate) viewport: Viewport,
    pub(crate) interaction: InteractionState,
    pub(crate) policy: ConnectionPolicy,
    revision: u64,
    stats: DispatchStats,
}

impl<T> FlowStore<T> {
    /// Build a store from options. Options are normalized first; invalid
    /// initial elements reject the whole construction.
    pub fn new(options: FlowOptions<T>) -> FlowResult<Self> {
        let mut options = options.normalized();
        let elements = std::mem::take(&mut options.elements);
        let id = options
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let rules = EdgeRules {
            allow_self_loops: options.allow_self_connections,
            prevent_duplicates: options.prevent_duplicate_edges,
        };
        let registry = TypeRegistry {
            node_types: options.node_types.clone(),
            edge_types: options.edge_types.clone(),
        };
        let mut graph = GraphStore::new(rules, registry);
        graph.add_elements(elements)?;

        let mut viewport = Viewport::new(options.min_zoom, options.max_zoom, options.translate_extent);
        let [x, y] = options.default_position;
        viewport.set_transform(Transform::new(x, y, options.default_zoom));

        let policy = ConnectionPolicy::from_options(&options);

        info!(
            %id,
            nodes = graph.nodes().len(),
            edges = graph.edges().len(),
            "Flow store created"
        );

        Ok(Self {
            id,
            options,
            graph,
            viewport,
            interaction: InteractionState::default(),
            policy,
            revision: 0,
            stats: DispatchStats::default(),
        })
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn options(&self) -> &FlowOptions<T> {
        &self.options
    }

    pub fn graph(&self) -> &GraphStore<T> {
        &self.graph
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Increments on every applied change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn transform(&self) -> Transform {
        self.viewport.transform()
    }

    pub fn node(&self, id: &str) -> Option<&Node<T>> {
        self.graph.node(id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge<T>> {
        self.graph.edge(id)
    }

    pub fn selected_ids(&self) -> Vec<ElementId> {
        self.graph.selected_ids()
    }

    /// The box being drawn, while a box selection is live.
    pub fn selection_rect(&self) -> Option<SelectionRect> {
        self.interaction.selection.active().map(|s| s.rect)
    }

    /// The connection being dragged, while one is live.
    pub fn connection(&self) -> Option<&PendingConnection> {
        self.interaction.connection.active()
    }

    pub fn dispatch_stats(&self) -> &DispatchStats {
        &self.stats
    }

    /// Nodes to paint, in paint order. Culled to the visible rect when
    /// `only_render_visible_elements` is set and the pane has been measured.
    pub fn render_nodes(&self) -> Vec<&Node<T>> {
        if self.culling() {
            self.graph.visible_nodes(&self.viewport.visible_box())
        } else {
            self.graph.render_order()
        }
    }

    /// Edges to paint: hidden edges and edges touching hidden nodes are
    /// skipped; when culling, at least one endpoint must be on screen.
    pub fn render_edges(&self) -> Vec<&Edge<T>> {
        let shown: HashSet<&str> = self.render_nodes().into_iter().map(|n| n.id.as_str()).collect();
        let culling = self.culling();
        self.graph
            .edges()
            .iter()
            .filter(|e| !e.hidden)
            .filter(|e| {
                [&e.source, &e.target]
                    .into_iter()
                    .all(|id| self.graph.node(id).is_some_and(|n| !n.hidden))
            })
            .filter(|e| !culling || shown.contains(e.source.as_str()) || shown.contains(e.target.as_str()))
            .collect()
    }

    fn culling(&self) -> bool {
        let dims = self.viewport.dimensions();
        self.options.only_render_visible_elements && dims.width > 0.0 && dims.height > 0.0
    }

    // ------------------------------------------------------------------
    // Intents
    // ------------------------------------------------------------------

    /// Apply one interaction intent. The revision is bumped even when the
    /// intent fails, since a failed release still ends its gesture.
    pub fn dispatch(&mut self, event: FlowEvent) -> FlowResult<()> {
        let kind = event.kind();
        let (result, elapsed_ms) = measure(|| self.apply(event));
        self.stats.record(kind, elapsed_ms);
        self.revision += 1;
        if let Err(ref error) = result {
            debug!(event = kind, %error, "Intent rejected");
        }
        result
    }

    fn apply(&mut self, event: FlowEvent) -> FlowResult<()> {
        match event {
            FlowEvent::PointerDown(e) => self.handle_pointer_down(&e),
            FlowEvent::PointerMove(e) => self.handle_pointer_move(&e),
            FlowEvent::PointerUp(e) => self.handle_pointer_up(&e),
            FlowEvent::Scroll(e) => {
                self.handle_scroll(&e);
                Ok(())
            }
            FlowEvent::DoubleClick(e) => {
                self.handle_double_click(&e);
                Ok(())
            }
            FlowEvent::KeyDown(e) => {
                self.handle_key_down(&e);
                Ok(())
            }
            FlowEvent::Reset => {
                self.reset_interaction();
                Ok(())
            }
            FlowEvent::Resize { width, height } => {
                self.viewport.set_dimensions(width, height);
                Ok(())
            }
            FlowEvent::NodeMeasured { id, dimensions } => self.graph.update_node_dimensions(&id, dimensions),
        }
    }

    /// Cancel every gesture. Dragged nodes keep their current positions.
    fn reset_interaction(&mut self) {
        self.end_node_drag();
        self.interaction.reset();
        debug!("Interaction reset");
    }

    // ------------------------------------------------------------------
    // Imperative API
    // ------------------------------------------------------------------

    pub fn zoom_in(&mut self) -> Transform {
        self.revision += 1;
        self.viewport.zoom_in()
    }

    pub fn zoom_out(&mut self) -> Transform {
        self.revision += 1;
        self.viewport.zoom_out()
    }

    pub fn zoom_to(&mut self, level: f64) -> Transform {
        self.revision += 1;
        self.viewport.zoom_to(level)
    }

    pub fn set_transform(&mut self, transform: Transform) -> Transform {
        self.revision += 1;
        self.viewport.set_transform(transform)
    }

    /// Fit the visible nodes (all nodes with `include_hidden_nodes`) into the
    /// pane. Does nothing with no nodes or an unmeasured pane.
    pub fn fit_view(&mut self, params: Option<FitViewParams>) -> Transform {
        let params = params.unwrap_or_default();
        let nodes = self
            .graph
            .nodes()
            .iter()
            .filter(|n| params.include_hidden_nodes || !n.hidden);
        let Some(rect) = get_rect_of_nodes(nodes) else {
            return self.viewport.transform();
        };
        self.revision += 1;
        let transform = self.viewport.fit_bounds(rect, &params);
        debug!(x = transform.x, y = transform.y, zoom = transform.zoom, "Fit view");
        transform
    }

    /// Screen position to graph position under the current transform.
    pub fn project(&self, position: XYPosition) -> XYPosition {
        self.viewport.project(position)
    }

    pub fn set_connection_validator(&mut self, validator: impl Fn(&Connection) -> bool + Send + Sync + 'static) {
        self.policy.validator = Some(std::sync::Arc::new(validator));
    }

    // ------------------------------------------------------------------
    // Graph mutation
    // ------------------------------------------------------------------

    /// Add nodes and edges; nothing is applied if any element is invalid.
    pub fn add_elements(&mut self, elements: Vec<FlowElement<T>>) -> FlowResult<()> {
        self.graph.add_elements(elements)?;
        self.revision += 1;
        Ok(())
    }

    /// Validate and add an edge for `connection`, returning its id.
    pub fn add_connection(&mut self, connection: &Connection) -> FlowResult<ElementId> {
        let id = self.graph.add_edge(Edge::from_connection(connection))?;
        self.revision += 1;
        Ok(id)
    }

    /// Remove elements by id with cascade. Unknown ids are ignored.
    pub fn remove_elements<S: AsRef<str>>(&mut self, ids: &[S]) -> Vec<FlowElement<T>> {
        let removed = self.graph.remove_elements(ids);
        if !removed.is_empty() {
            self.revision += 1;
        }
        removed
    }

    pub fn update_edge(&mut self, edge_id: &str, connection: &Connection) -> FlowResult<ElementId> {
        let id = self.graph.update_edge(edge_id, connection)?;
        self.revision += 1;
        Ok(id)
    }

    pub fn set_selected<S: AsRef<str>>(&mut self, ids: &[S], selected: bool) -> FlowResult<()> {
        self.graph.set_selected(ids, selected)?;
        self.revision += 1;
        Ok(())
    }

    pub fn update_node_position(&mut self, id: &str, position: XYPosition) -> FlowResult<()> {
        self.graph.update_node_position(id, position)?;
        self.revision += 1;
        Ok(())
    }

    /// Replace the graph and transform with an exported object. The current
    /// state is kept if the object holds invalid elements.
    pub fn load_object(&mut self, object: FlowExportObject<T>) -> FlowResult<()> {
        self.graph.replace_elements(object.elements)?;
        self.interaction.reset();
        let [x, y] = object.position;
        self.viewport.set_transform(Transform::new(x, y, object.zoom));
        self.revision += 1;
        info!(nodes = self.graph.nodes().len(), edges = self.graph.edges().len(), "Flow loaded");
        Ok(())
    }
}

impl<T: Clone> FlowStore<T> {
    /// Nodes in insertion order followed by edges.
    pub fn get_elements(&self) -> Vec<FlowElement<T>> {
        self.graph.get_elements()
    }

    pub fn to_object(&self) -> FlowExportObject<T> {
        let t = self.viewport.transform();
        FlowExportObject {
            elements: self.get_elements(),
            position: [t.x, t.y],
            zoom: t.zoom,
        }
    }
}

impl<T: Clone + serde::Serialize> FlowStore<T> {
    /// Export as JSON in the canonical export shape.
    pub fn to_json(&self) -> FlowResult<String> {
        Ok(serde_json::to_string(&self.to_object())?)
    }
}
