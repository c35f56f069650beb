//! Pointer move - advances whichever gesture is active.
//!
//! ## Performance Notes
//!
//! Pointer move fires at display rate during a gesture. A node drag touches
//! only the tracked nodes (one R-tree update each); connection hover runs a
//! policy check against a single candidate handle.

use super::events::{PointerEvent, PointerTarget};
use crate::error::FlowResult;
use crate::flow::FlowStore;
use crate::geometry::{clamp_position, snap_position};
use crate::profile_scope;
use crate::types::XYPosition;
use tracing::trace;

impl<T> FlowStore<T> {
    pub(crate) fn handle_pointer_move(&mut self, event: &PointerEvent) -> FlowResult<()> {
        profile_scope!("pointer_move");

        self.drag_nodes(event.position)?;

        if let Some(selection) = self.interaction.selection.active_mut() {
            selection.rect.extend_to(event.position);
        }

        if let Some(pan) = self.interaction.pan.active_mut() {
            let delta = XYPosition::new(event.position.x - pan.last_pos.x, event.position.y - pan.last_pos.y);
            pan.last_pos = event.position;
            self.viewport.pan_by(delta);
        }

        self.hover_connection(event);
        Ok(())
    }

    /// Move every tracked node by the graph-space pointer delta since press.
    fn drag_nodes(&mut self, pointer: XYPosition) -> FlowResult<()> {
        let Some(drag) = self.interaction.node_drag.active_mut() else {
            return Ok(());
        };
        profile_scope!("drag_nodes");

        let current = self.viewport.project(pointer);
        let dx = current.x - drag.origin.x;
        let dy = current.y - drag.origin.y;
        if dx == 0.0 && dy == 0.0 && !drag.moved {
            return Ok(());
        }
        drag.moved = true;

        for (id, start) in &drag.nodes {
            let Some(node) = self.graph.node(id) else {
                continue;
            };
            let dims = node.dimensions;
            let mut position = start.offset(dx, dy);
            if self.options.snap_to_grid {
                position = snap_position(position, self.options.snap_grid);
            }
            position = clamp_position(position, self.options.node_extent.as_ref(), dims);

            self.graph.update_node_position(id, position)?;
            self.graph.set_node_dragging(id, true)?;
        }
        trace!(dx, dy, count = drag.nodes.len(), "Dragged nodes");
        Ok(())
    }

    /// Track the cursor and the handle it would connect to.
    fn hover_connection(&mut self, event: &PointerEvent) {
        let Some(pending) = self.interaction.connection.active_mut() else {
            return;
        };
        pending.position = self.viewport.project(event.position);
        pending.candidate = match &event.target {
            PointerTarget::Handle(handle) => self
                .policy
                .check(&self.graph, &pending.from, handle)
                .ok()
                .map(|_| handle.clone()),
            _ => None,
        };
    }
}
