//! Viewport intents - scroll, pinch and double-click zoom.

use super::events::{PointerEvent, PointerTarget, ScrollEvent};
use crate::constants::DOUBLE_CLICK_ZOOM_FACTOR;
use crate::flow::FlowStore;
use crate::policy::{ScrollAction, scroll_action, scroll_pan_delta, selection_key_held, wheel_zoom_factor};
use crate::profile_scope;
use tracing::trace;

impl<T> FlowStore<T> {
    pub(crate) fn handle_scroll(&mut self, event: &ScrollEvent) {
        profile_scope!("scroll");

        match scroll_action(&self.options, &event.keys, event.pinch) {
            ScrollAction::Zoom => {
                self.viewport.scale_by(wheel_zoom_factor(event.delta.y), event.position);
            }
            ScrollAction::Pan(mode) => {
                let delta = scroll_pan_delta(event.delta, mode, self.options.pan_on_scroll_speed);
                self.viewport.pan_by(delta);
            }
            ScrollAction::Ignore => trace!("Scroll ignored"),
        }
    }

    /// Zoom in around the pointer; out with the selection key held.
    pub(crate) fn handle_double_click(&mut self, event: &PointerEvent) {
        if !self.options.zoom_on_double_click || event.target != PointerTarget::Pane {
            return;
        }
        let factor = if selection_key_held(&self.options, &event.keys) {
            1.0 / DOUBLE_CLICK_ZOOM_FACTOR
        } else {
            DOUBLE_CLICK_ZOOM_FACTOR
        };
        self.viewport.scale_by(factor, event.position);
    }
}
