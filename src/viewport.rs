//! Viewport controller - pan, zoom and fit view.
//!
//! Owns the current transform together with the pane size, zoom bounds and
//! translate extent. Every operation goes through one apply step that
//! clamps the zoom and then soft-constrains the translate, so the transform
//! is always valid after any call.

use crate::constants::{FIT_VIEW_PADDING, ZOOM_STEP};
use crate::geometry::{self, constrain_transform, transform_for_bounds, transform_keeping_point};
use crate::types::{Bounds, CoordinateExtent, Dimensions, FitViewParams, Rect, Transform, XYPosition};
use tracing::trace;

#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    transform: Transform,
    width: f64,
    height: f64,
    min_zoom: f64,
    max_zoom: f64,
    translate_extent: Option<CoordinateExtent>,
}

impl Viewport {
    pub fn new(min_zoom: f64, max_zoom: f64, translate_extent: Option<CoordinateExtent>) -> Self {
        Self {
            transform: Transform::default(),
            width: 0.0,
            height: 0.0,
            min_zoom,
            max_zoom,
            translate_extent,
        }
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.transform.zoom
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    pub fn zoom_bounds(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    pub fn translate_extent(&self) -> Option<&CoordinateExtent> {
        self.translate_extent.as_ref()
    }

    /// Pane size as measured by the renderer.
    pub fn set_dimensions(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.apply(self.transform);
    }

    pub fn set_zoom_bounds(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom.min(max_zoom);
        self.max_zoom = max_zoom.max(min_zoom);
        self.apply(self.transform);
    }

    pub fn set_translate_extent(&mut self, extent: Option<CoordinateExtent>) {
        self.translate_extent = extent;
        self.apply(self.transform);
    }

    fn center(&self) -> XYPosition {
        XYPosition::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp zoom, constrain translate, store.
    fn apply(&mut self, transform: Transform) -> Transform {
        let zoom = geometry::clamp_zoom(transform.zoom, self.min_zoom, self.max_zoom);
        let transform = if zoom == transform.zoom {
            transform
        } else {
            // Re-clamp around the pane centre so translate and zoom agree
            let centre = self.center();
            transform_keeping_point(centre, geometry::project(centre, &transform), zoom)
        };
        self.transform = constrain_transform(transform, self.width, self.height, self.translate_extent.as_ref());
        trace!(x = self.transform.x, y = self.transform.y, zoom = self.transform.zoom, "Viewport transform");
        self.transform
    }

    // ------------------------------------------------------------------
    // Coordinate conversion
    // ------------------------------------------------------------------

    #[inline]
    pub fn project(&self, screen: XYPosition) -> XYPosition {
        geometry::project(screen, &self.transform)
    }

    #[inline]
    pub fn unproject(&self, graph: XYPosition) -> XYPosition {
        geometry::unproject(graph, &self.transform)
    }

    /// Graph-space box currently on screen.
    pub fn visible_box(&self) -> Bounds {
        geometry::visible_box(&self.transform, self.width, self.height)
    }

    pub fn visible_rect(&self) -> Rect {
        geometry::box_to_rect(self.visible_box())
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    pub fn set_transform(&mut self, transform: Transform) -> Transform {
        if !(transform.x.is_finite() && transform.y.is_finite() && transform.zoom.is_finite()) {
            return self.transform;
        }
        self.apply(transform)
    }

    /// Zoom to `level` around the pane center.
    pub fn zoom_to(&mut self, level: f64) -> Transform {
        self.zoom_to_point(level, self.center())
    }

    /// Zoom to `level` keeping the graph point under screen point `focal`
    /// fixed.
    pub fn zoom_to_point(&mut self, level: f64, focal: XYPosition) -> Transform {
        if !level.is_finite() || level <= 0.0 {
            return self.transform;
        }
        let zoom = geometry::clamp_zoom(level, self.min_zoom, self.max_zoom);
        let anchor = self.project(focal);
        self.apply(transform_keeping_point(focal, anchor, zoom))
    }

    /// Multiply the zoom by `factor` around `focal`.
    pub fn scale_by(&mut self, factor: f64, focal: XYPosition) -> Transform {
        self.zoom_to_point(self.transform.zoom * factor, focal)
    }

    pub fn zoom_in(&mut self) -> Transform {
        self.scale_by(ZOOM_STEP, self.center())
    }

    pub fn zoom_out(&mut self) -> Transform {
        self.scale_by(1.0 / ZOOM_STEP, self.center())
    }

    /// Translate by a screen-space delta, constrained to the extent.
    pub fn pan_by(&mut self, delta: XYPosition) -> Transform {
        let t = self.transform;
        self.apply(Transform::new(t.x + delta.x, t.y + delta.y, t.zoom))
    }

    /// Fit `rect` (graph space) into the pane. No-op before the pane has
    /// been measured.
    pub fn fit_bounds(&mut self, rect: Rect, params: &FitViewParams) -> Transform {
        if self.width <= 0.0 || self.height <= 0.0 {
            return self.transform;
        }
        // Per-call bounds can only narrow the viewport's own
        let min_zoom = params.min_zoom.map_or(self.min_zoom, |z| z.max(self.min_zoom));
        let max_zoom = params.max_zoom.map_or(self.max_zoom, |z| z.min(self.max_zoom));
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (self.min_zoom, self.max_zoom)
        };
        let padding = params.padding.unwrap_or(FIT_VIEW_PADDING).max(0.0);
        let target = transform_for_bounds(rect, self.width, self.height, min_zoom, max_zoom, padding);
        self.transform = constrain_transform(target, self.width, self.height, self.translate_extent.as_ref());
        self.transform
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(crate::constants::MIN_ZOOM, crate::constants::MAX_ZOOM, None)
    }
}
