//! Pointer up - finalize whichever gesture is active and return to idle.

use super::events::{PointerEvent, PointerTarget};
use super::state::{BoxSelection, NodeDrag, PendingConnection};
use crate::error::FlowResult;
use crate::flow::FlowStore;
use crate::geometry::screen_rect_to_graph_box;
use crate::policy::{KeySet, multi_selection_key_held};
use crate::profile_scope;
use crate::types::{Edge, ElementId};
use std::collections::HashSet;
use tracing::debug;

impl<T> FlowStore<T> {
    pub(crate) fn handle_pointer_up(&mut self, event: &PointerEvent) -> FlowResult<()> {
        profile_scope!("pointer_up");

        if let Some(drag) = self.end_node_drag() {
            self.select_clicked_node(drag);
        }

        if let Some(selection) = self.interaction.selection.finish() {
            self.finish_box_selection(selection, &event.keys);
        }

        if self.interaction.pan.finish().is_some() {
            debug!("Pane pan finished");
        }

        match self.interaction.connection.finish() {
            Some(pending) => self.finish_connection(pending, &event.target),
            None => Ok(()),
        }
    }

    /// Clear `dragging` on every tracked node; positions stay where they are.
    pub(crate) fn end_node_drag(&mut self) -> Option<NodeDrag> {
        let drag = self.interaction.node_drag.finish()?;
        for (id, _) in &drag.nodes {
            // Nodes deleted mid-drag are simply skipped
            let _ = self.graph.set_node_dragging(id, false);
        }
        debug!(count = drag.nodes.len(), moved = drag.moved, "Node drag finished");
        Some(drag)
    }

    /// A press and release without movement selects the pressed node.
    fn select_clicked_node(&mut self, drag: NodeDrag) {
        let Some(id) = drag.select_on_release.filter(|_| !drag.moved) else {
            return;
        };
        if self.graph.has_node(&id) {
            debug!(node = %id, "Node selected by click");
            self.graph.select_only(&HashSet::from([id]));
        }
    }

    fn finish_box_selection(&mut self, selection: BoxSelection, keys: &KeySet) {
        profile_scope!("box_selection");

        let bounds = screen_rect_to_graph_box(selection.rect.rect(), &self.viewport.transform());
        let nodes: HashSet<ElementId> = self
            .graph
            .nodes_in_box(&bounds, false)
            .into_iter()
            .filter(|id| {
                self.graph
                    .node(id)
                    .is_some_and(|n| n.is_selectable(self.options.elements_selectable))
            })
            .collect();

        let mut selected: HashSet<ElementId> = self.graph.connected_edge_ids(&nodes).into_iter().collect();
        selected.extend(nodes);
        if multi_selection_key_held(&self.options, keys) {
            selected.extend(selection.prior);
        }

        debug!(count = selected.len(), "Box selection finished");
        self.graph.select_only(&selected);
    }

    fn finish_connection(&mut self, pending: PendingConnection, target: &PointerTarget) -> FlowResult<()> {
        let PointerTarget::Handle(to) = target else {
            debug!(from = %pending.from.node_id, "Connection released off-handle, discarded");
            return Ok(());
        };

        let connection = self.policy.check(&self.graph, &pending.from, to)?;
        let id = self.graph.add_edge(Edge::from_connection(&connection))?;
        debug!(%id, source = %connection.source, target = %connection.target, "Connection created");
        Ok(())
    }
}
