//! Node storage, selection flags and spatial queries.

use super::edges::EdgeRules;
use crate::constants::{BUILTIN_EDGE_TYPES, BUILTIN_NODE_TYPES, DEFAULT_TYPE};
use crate::error::{FlowError, FlowResult};
use crate::spatial_index::SpatialIndex;
use crate::types::{Bounds, Dimensions, Edge, ElementId, FlowElement, Node, XYPosition};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

/// Registered node and edge type tags.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    pub node_types: BTreeSet<String>,
    pub edge_types: BTreeSet<String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self {
            node_types: BUILTIN_NODE_TYPES.iter().map(|s| s.to_string()).collect(),
            edge_types: BUILTIN_EDGE_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TypeRegistry {
    fn resolve(registered: &BTreeSet<String>, kind: &str, id: &str, tag: &mut String) {
        if !registered.contains(tag.as_str()) {
            warn!(%id, tag = %tag, "{kind} type not found, using fallback type \"{DEFAULT_TYPE}\"");
            *tag = DEFAULT_TYPE.to_string();
        }
    }
}

/// Nodes and edges in insertion order with id lookup and an R-tree over
/// node bounds.
#[derive(Debug)]
pub struct GraphStore<T = serde_json::Value> {
    pub(super) nodes: Vec<Node<T>>,
    pub(super) node_index: HashMap<ElementId, usize>,
    pub(super) edges: Vec<Edge<T>>,
    pub(super) edge_index: HashMap<ElementId, usize>,
    spatial: SpatialIndex,
    pub(super) rules: EdgeRules,
    registry: TypeRegistry,
}

impl<T> Default for GraphStore<T> {
    fn default() -> Self {
        Self::new(EdgeRules::default(), TypeRegistry::default())
    }
}

impl<T> GraphStore<T> {
    pub fn new(rules: EdgeRules, registry: TypeRegistry) -> Self {
        Self {
            nodes: Vec::new(),
            node_index: HashMap::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
            spatial: SpatialIndex::new(),
            rules,
            registry,
        }
    }

    pub fn rules(&self) -> &EdgeRules {
        &self.rules
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn node(&self, id: &str) -> Option<&Node<T>> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn edge(&self, id: &str) -> Option<&Edge<T>> {
        self.edge_index.get(id).map(|&i| &self.edges[i])
    }

    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id) || self.edge_index.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> FlowResult<&mut Node<T>> {
        match self.node_index.get(id) {
            Some(&i) => Ok(&mut self.nodes[i]),
            None => Err(FlowError::NodeNotFound(id.to_string())),
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Add nodes; the whole batch is rejected if any id is already in use.
    pub fn add_nodes(&mut self, nodes: Vec<Node<T>>) -> FlowResult<()> {
        self.check_new_ids(nodes.iter().map(|n| n.id.as_str()))?;
        for node in nodes {
            self.insert_node(node);
        }
        Ok(())
    }

    /// Add nodes and edges together; edges may reference nodes in the same
    /// batch. Nothing is applied if any element is invalid.
    pub fn add_elements(&mut self, elements: Vec<FlowElement<T>>) -> FlowResult<()> {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for element in elements {
            match element {
                FlowElement::Node(node) => nodes.push(node),
                FlowElement::Edge(edge) => edges.push(edge),
            }
        }

        self.check_new_ids(nodes.iter().map(|n| n.id.as_str()).chain(edges.iter().map(|e| e.id.as_str())))?;
        let pending: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        self.validate_edges(&edges, &pending)?;

        for node in nodes {
            self.insert_node(node);
        }
        for edge in edges {
            self.insert_edge(edge);
        }
        Ok(())
    }

    /// Swap in a new element set, keeping rules and registry. The current
    /// elements stay if the new set is invalid.
    pub fn replace_elements(&mut self, elements: Vec<FlowElement<T>>) -> FlowResult<()> {
        let mut next = Self::new(self.rules, self.registry.clone());
        next.add_elements(elements)?;
        *self = next;
        Ok(())
    }

    pub(super) fn check_new_ids<'a>(&self, ids: impl Iterator<Item = &'a str>) -> FlowResult<()> {
        let mut seen = HashSet::new();
        for id in ids {
            if self.contains(id) || !seen.insert(id) {
                return Err(FlowError::DuplicateId(id.to_string()));
            }
        }
        Ok(())
    }

    fn insert_node(&mut self, mut node: Node<T>) {
        TypeRegistry::resolve(&self.registry.node_types, "Node", &node.id, &mut node.node_type);
        self.spatial.insert(node.id.clone(), node.rect());
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    pub(super) fn insert_edge(&mut self, mut edge: Edge<T>) {
        TypeRegistry::resolve(&self.registry.edge_types, "Edge", &edge.id, &mut edge.edge_type);
        self.edge_index.insert(edge.id.clone(), self.edges.len());
        self.edges.push(edge);
    }

    pub fn update_node_position(&mut self, id: &str, position: XYPosition) -> FlowResult<()> {
        let node = self.node_mut(id)?;
        node.position = position;
        let rect = node.rect();
        self.spatial.insert(id.to_string(), rect);
        Ok(())
    }

    /// Record the size the renderer measured for a node.
    pub fn update_node_dimensions(&mut self, id: &str, dimensions: Dimensions) -> FlowResult<()> {
        let node = self.node_mut(id)?;
        node.dimensions = Some(dimensions);
        let rect = node.rect();
        self.spatial.insert(id.to_string(), rect);
        Ok(())
    }

    pub fn set_node_dragging(&mut self, id: &str, dragging: bool) -> FlowResult<()> {
        self.node_mut(id)?.dragging = dragging;
        Ok(())
    }

    /// Remove nodes and edges by id, cascading node removal to every
    /// incident edge. Unknown ids are skipped. Returns what was removed.
    pub fn remove_elements<S: AsRef<str>>(&mut self, ids: &[S]) -> Vec<FlowElement<T>> {
        let ids: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        let node_ids: HashSet<&str> = ids.iter().copied().filter(|id| self.has_node(id)).collect();

        let mut removed = Vec::new();
        if !node_ids.is_empty() {
            let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.nodes)
                .into_iter()
                .partition(|n| node_ids.contains(n.id.as_str()));
            self.nodes = kept;
            for node in gone {
                self.spatial.remove(&node.id);
                removed.push(FlowElement::Node(node));
            }
        }

        let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.edges)
            .into_iter()
            .partition(|e| {
                ids.contains(e.id.as_str())
                    || node_ids.contains(e.source.as_str())
                    || node_ids.contains(e.target.as_str())
            });
        self.edges = kept;
        removed.extend(gone.into_iter().map(FlowElement::Edge));

        if !removed.is_empty() {
            self.reindex();
            debug!(count = removed.len(), "Removed elements");
        }
        removed
    }

    pub(super) fn reindex(&mut self) {
        self.node_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
        self.edge_index = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
    }

    /// Drop every node and edge.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.node_index.clear();
        self.edge_index.clear();
        self.spatial.clear();
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Set the `selected` flag on the given nodes or edges. Unknown ids
    /// reject the whole call.
    pub fn set_selected<S: AsRef<str>>(&mut self, ids: &[S], value: bool) -> FlowResult<()> {
        if let Some(missing) = ids.iter().map(|id| id.as_ref()).find(|id| !self.contains(id)) {
            return Err(FlowError::ElementNotFound(missing.to_string()));
        }
        for id in ids {
            let id = id.as_ref();
            if let Some(&i) = self.node_index.get(id) {
                self.nodes[i].selected = value;
            } else if let Some(&i) = self.edge_index.get(id) {
                self.edges[i].selected = value;
            }
        }
        Ok(())
    }

    /// Make `ids` the exact selection. Unknown ids are ignored.
    pub fn select_only(&mut self, ids: &HashSet<ElementId>) {
        for node in &mut self.nodes {
            node.selected = ids.contains(&node.id);
        }
        for edge in &mut self.edges {
            edge.selected = ids.contains(&edge.id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.nodes.iter_mut().for_each(|n| n.selected = false);
        self.edges.iter_mut().for_each(|e| e.selected = false);
    }

    /// Ids of every selected node followed by every selected edge.
    pub fn selected_ids(&self) -> Vec<ElementId> {
        self.nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| n.id.clone())
            .chain(self.edges.iter().filter(|e| e.selected).map(|e| e.id.clone()))
            .collect()
    }

    /// Edges with either endpoint in `node_ids`.
    pub fn connected_edges(&self, node_ids: &HashSet<ElementId>) -> Vec<&Edge<T>> {
        self.edges
            .iter()
            .filter(|e| node_ids.contains(&e.source) || node_ids.contains(&e.target))
            .collect()
    }

    pub fn connected_edge_ids(&self, node_ids: &HashSet<ElementId>) -> Vec<ElementId> {
        self.connected_edges(node_ids)
            .into_iter()
            .map(|e| e.id.clone())
            .collect()
    }

    // ------------------------------------------------------------------
    // Spatial queries
    // ------------------------------------------------------------------

    /// Nodes whose bounds overlap `bounds` (graph space), in insertion order.
    pub fn nodes_in_box(&self, bounds: &Bounds, include_hidden: bool) -> Vec<ElementId> {
        let mut hits: Vec<usize> = self
            .spatial
            .query_box(bounds)
            .iter()
            .filter_map(|id| self.node_index.get(id).copied())
            .filter(|&i| include_hidden || !self.nodes[i].hidden)
            .collect();
        hits.sort_unstable();
        hits.into_iter().map(|i| self.nodes[i].id.clone()).collect()
    }

    /// Topmost visible node under a graph-space point.
    pub fn node_at(&self, point: XYPosition) -> Option<ElementId> {
        self.spatial
            .query_point(point.x, point.y)
            .iter()
            .filter_map(|id| self.node_index.get(id).copied())
            .filter(|&i| !self.nodes[i].hidden)
            .max_by_key(|&i| (self.nodes[i].selected, i))
            .map(|i| self.nodes[i].id.clone())
    }

    /// Nodes in paint order: insertion order with selected nodes promoted
    /// above unselected ones.
    pub fn render_order(&self) -> Vec<&Node<T>> {
        let (selected, rest): (Vec<&Node<T>>, Vec<&Node<T>>) =
            self.nodes.iter().filter(|n| !n.hidden).partition(|n| n.selected);
        rest.into_iter().chain(selected).collect()
    }

    /// `render_order` restricted to nodes overlapping `bounds`.
    pub fn visible_nodes(&self, bounds: &Bounds) -> Vec<&Node<T>> {
        let visible: HashSet<ElementId> = self.nodes_in_box(bounds, false).into_iter().collect();
        self.render_order()
            .into_iter()
            .filter(|n| visible.contains(&n.id))
            .collect()
    }
}

impl<T: Clone> GraphStore<T> {
    /// Snapshot of every node (insertion order) followed by every edge.
    pub fn get_elements(&self) -> Vec<FlowElement<T>> {
        self.nodes
            .iter()
            .cloned()
            .map(FlowElement::Node)
            .chain(self.edges.iter().cloned().map(FlowElement::Edge))
            .collect()
    }
}
