//! Key down - deletion of the current selection.

use super::events::KeyEvent;
use crate::flow::FlowStore;
use crate::policy::is_delete_key;
use tracing::debug;

impl<T> FlowStore<T> {
    pub(crate) fn handle_key_down(&mut self, event: &KeyEvent) {
        if !is_delete_key(&self.options, &event.key) {
            return;
        }
        let ids = self.graph.selected_ids();
        if ids.is_empty() {
            return;
        }

        let removed = self.graph.remove_elements(&ids);
        debug!(count = removed.len(), "Deleted selection");

        // Gestures holding removed nodes lose them
        let graph = &self.graph;
        if let Some(drag) = self.interaction.node_drag.active_mut() {
            drag.nodes.retain(|(id, _)| graph.has_node(id));
        }
        if self
            .interaction
            .connection
            .active()
            .is_some_and(|c| !graph.has_node(&c.from.node_id))
        {
            self.interaction.connection.finish();
        }
    }
}
