//! Edge validation, creation and reconnection.
//!
//! An edge is only ever stored when both endpoints exist. Self loops and
//! duplicate routes are governed by [`EdgeRules`]; parallel edges between the
//! same pair of nodes are valid unless `prevent_duplicates` is set.

use super::store::GraphStore;
use crate::error::{FlowError, FlowResult};
use crate::types::{Connection, Edge, ElementId};
use std::collections::HashSet;
use tracing::debug;

/// Structural rules applied to every new or reconnected edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeRules {
    pub allow_self_loops: bool,
    pub prevent_duplicates: bool,
}

impl<T> GraphStore<T> {
    /// Add edges; nothing is applied if any edge is invalid.
    pub fn add_edges(&mut self, edges: Vec<Edge<T>>) -> FlowResult<()> {
        self.check_new_ids(edges.iter().map(|e| e.id.as_str()))?;
        self.validate_edges(&edges, &HashSet::new())?;
        for edge in edges {
            self.insert_edge(edge);
        }
        Ok(())
    }

    pub fn add_edge(&mut self, edge: Edge<T>) -> FlowResult<ElementId> {
        let id = edge.id.clone();
        self.add_edges(vec![edge])?;
        debug!(%id, "Added edge");
        Ok(id)
    }

    /// Check endpoints, self loops and duplicates for a batch. `pending_nodes`
    /// are nodes being added in the same operation.
    pub(super) fn validate_edges(&self, edges: &[Edge<T>], pending_nodes: &HashSet<&str>) -> FlowResult<()> {
        for (i, edge) in edges.iter().enumerate() {
            self.validate_route(edge, pending_nodes, None)?;
            if self.rules.prevent_duplicates && edges[..i].iter().any(|e| e.same_route(edge)) {
                return Err(FlowError::DuplicateEdge(edge.id.clone()));
            }
        }
        Ok(())
    }

    /// Validate one edge against the stored graph, ignoring the stored edge
    /// `replacing` in the duplicate check.
    fn validate_route<U>(
        &self,
        edge: &Edge<U>,
        pending_nodes: &HashSet<&str>,
        replacing: Option<&str>,
    ) -> FlowResult<()> {
        for endpoint in [&edge.source, &edge.target] {
            if !self.has_node(endpoint) && !pending_nodes.contains(endpoint.as_str()) {
                return Err(FlowError::DanglingEdge {
                    edge: edge.id.clone(),
                    node: endpoint.clone(),
                });
            }
        }
        if edge.source == edge.target && !self.rules.allow_self_loops {
            return Err(FlowError::SelfConnection(edge.id.clone()));
        }
        if self.rules.prevent_duplicates
            && self
                .edges
                .iter()
                .any(|e| Some(e.id.as_str()) != replacing && e.same_route(edge))
        {
            return Err(FlowError::DuplicateEdge(edge.id.clone()));
        }
        Ok(())
    }

    /// Reconnect an existing edge to the endpoints of `connection`.
    ///
    /// The edge keeps its payload and flags but takes the id generated from
    /// the new route. Returns the new id.
    pub fn update_edge(&mut self, edge_id: &str, connection: &Connection) -> FlowResult<ElementId> {
        let index = *self
            .edge_index
            .get(edge_id)
            .ok_or_else(|| FlowError::EdgeNotFound(edge_id.to_string()))?;

        let candidate = Edge::<()>::from_connection(connection);
        if candidate.id != edge_id && self.contains(&candidate.id) {
            return Err(FlowError::DuplicateId(candidate.id));
        }
        self.validate_route(&candidate, &HashSet::new(), Some(edge_id))?;

        let edge = &mut self.edges[index];
        edge.id = candidate.id.clone();
        edge.source = candidate.source;
        edge.target = candidate.target;
        edge.source_handle = candidate.source_handle;
        edge.target_handle = candidate.target_handle;
        self.reindex();

        debug!(old = %edge_id, new = %candidate.id, "Reconnected edge");
        Ok(candidate.id)
    }
}
