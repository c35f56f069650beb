//! Pointer down - selection on press and gesture start.
//!
//! The pointer target decides which track starts:
//! - node: selection, then a node drag if the node is draggable
//! - handle: a pending connection if the node is connectable
//! - edge: selection only
//! - pane: box selection, or a pane pan
//!
//! Only one pointer is tracked. A press while any track is active is
//! ignored with a warning, whichever track that is.

use super::events::{PointerEvent, PointerTarget};
use super::state::{BoxSelection, NodeDrag, PanDrag, PendingConnection};
use crate::error::{FlowError, FlowResult};
use crate::flow::FlowStore;
use crate::policy::{multi_selection_key_held, selection_key_held};
use crate::profile_scope;
use crate::types::{ElementId, HandleRef, SelectionRect};
use std::collections::HashSet;
use tracing::{debug, warn};

impl<T> FlowStore<T> {
    pub(crate) fn handle_pointer_down(&mut self, event: &PointerEvent) -> FlowResult<()> {
        profile_scope!("pointer_down");

        // Single pointer: any live gesture blocks a new press, not only one on
        // the same track
        if !self.interaction.is_idle() {
            warn!(target_kind = ?event.target, "Pointer down while another gesture is live (single pointer), ignoring");
            return Ok(());
        }

        match &event.target {
            PointerTarget::Node(id) => self.press_node(id, event),
            PointerTarget::Handle(handle) => {
                self.press_handle(handle, event);
                Ok(())
            }
            PointerTarget::Edge(id) => self.press_edge(id, event),
            PointerTarget::Pane => {
                self.press_pane(event);
                Ok(())
            }
        }
    }

    fn press_node(&mut self, id: &str, event: &PointerEvent) -> FlowResult<()> {
        let node = self
            .graph
            .node(id)
            .ok_or_else(|| FlowError::NodeNotFound(id.to_string()))?;
        let selectable = node.is_selectable(self.options.elements_selectable);
        let draggable = node.is_draggable(self.options.nodes_draggable);
        let was_selected = node.selected;
        let multi = multi_selection_key_held(&self.options, &event.keys);
        // Without select-on-drag a plain click still selects, once released
        let click_select = selectable && !multi && !was_selected && !self.options.select_nodes_on_drag;

        if selectable {
            if multi {
                self.graph.set_selected(&[id], true)?;
            } else if !was_selected && (self.options.select_nodes_on_drag || !draggable) {
                self.graph.select_only(&HashSet::from([id.to_string()]));
            }
        }

        if !draggable {
            return Ok(());
        }

        let pressed_selected = self.graph.node(id).is_some_and(|n| n.selected);
        let nodes: Vec<(ElementId, _)> = if pressed_selected && self.options.select_nodes_on_drag {
            self.graph
                .nodes()
                .iter()
                .filter(|n| n.selected && n.is_draggable(self.options.nodes_draggable))
                .map(|n| (n.id.clone(), n.position))
                .collect()
        } else {
            self.graph
                .node(id)
                .map(|n| vec![(n.id.clone(), n.position)])
                .unwrap_or_default()
        };

        let origin = self.viewport.project(event.position);
        debug!(node = %id, count = nodes.len(), "Node drag started");
        self.interaction.node_drag.start(NodeDrag {
            origin,
            nodes,
            select_on_release: click_select.then(|| id.to_string()),
            moved: false,
        });
        Ok(())
    }

    fn press_handle(&mut self, handle: &HandleRef, event: &PointerEvent) {
        if let Err(reason) = self.policy.can_start(&self.graph, handle) {
            debug!(node = %handle.node_id, %reason, "Connection not started");
            return;
        }
        let position = self.viewport.project(event.position);
        debug!(node = %handle.node_id, handle = ?handle.handle_id, kind = ?handle.handle_type, "Connection started");
        self.interaction.connection.start(PendingConnection {
            from: handle.clone(),
            position,
            candidate: None,
        });
    }

    fn press_edge(&mut self, id: &str, event: &PointerEvent) -> FlowResult<()> {
        if self.graph.edge(id).is_none() {
            return Err(FlowError::EdgeNotFound(id.to_string()));
        }
        if !self.options.elements_selectable {
            return Ok(());
        }
        if multi_selection_key_held(&self.options, &event.keys) {
            self.graph.set_selected(&[id], true)?;
        } else {
            self.graph.select_only(&HashSet::from([id.to_string()]));
        }
        Ok(())
    }

    fn press_pane(&mut self, event: &PointerEvent) {
        let multi = multi_selection_key_held(&self.options, &event.keys);
        let box_select = self.options.elements_selectable
            && (self.options.selection_on_drag || selection_key_held(&self.options, &event.keys));

        if box_select {
            let prior: HashSet<ElementId> = self.graph.selected_ids().into_iter().collect();
            debug!(x = event.position.x, y = event.position.y, "Box selection started");
            self.interaction.selection.start(BoxSelection {
                rect: SelectionRect::starting_at(event.position),
                prior,
            });
            return;
        }

        if !multi {
            self.graph.clear_selection();
        }
        if self.options.pane_moveable {
            self.interaction.pan.start(PanDrag {
                last_pos: event.position,
            });
        }
    }
}
