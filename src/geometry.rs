//! Coordinate math for the flow surface.
//!
//! Centralizes every screen <-> graph conversion and box operation so the
//! viewport, the store and the gesture handlers share one set of formulas.
//! Nothing in here holds state.

use crate::types::{Bounds, CoordinateExtent, Dimensions, Node, Rect, Transform, XYPosition};

/// Convert a screen position to graph space.
#[inline]
pub fn project(screen: XYPosition, transform: &Transform) -> XYPosition {
    XYPosition::new(
        (screen.x - transform.x) / transform.zoom,
        (screen.y - transform.y) / transform.zoom,
    )
}

/// Convert a graph position to screen space.
#[inline]
pub fn unproject(graph: XYPosition, transform: &Transform) -> XYPosition {
    XYPosition::new(
        graph.x * transform.zoom + transform.x,
        graph.y * transform.zoom + transform.y,
    )
}

#[inline]
pub fn rect_to_box(rect: Rect) -> Bounds {
    Bounds::new(rect.x, rect.y, rect.x + rect.width, rect.y + rect.height)
}

#[inline]
pub fn box_to_rect(bounds: Bounds) -> Rect {
    Rect::new(bounds.x, bounds.y, bounds.x2 - bounds.x, bounds.y2 - bounds.y)
}

/// Union of two boxes.
pub fn get_bounds_of_boxes(a: Bounds, b: Bounds) -> Bounds {
    Bounds::new(a.x.min(b.x), a.y.min(b.y), a.x2.max(b.x2), a.y2.max(b.y2))
}

/// Bounding rect of a set of nodes, `None` when the set is empty.
pub fn get_rect_of_nodes<'a, T: 'a>(nodes: impl IntoIterator<Item = &'a Node<T>>) -> Option<Rect> {
    nodes
        .into_iter()
        .map(|node| rect_to_box(node.rect()))
        .reduce(get_bounds_of_boxes)
        .map(box_to_rect)
}

/// Overlap test; boxes that merely touch count as overlapping.
#[inline]
pub fn rects_overlap(a: &Bounds, b: &Bounds) -> bool {
    !(a.x2 < b.x || b.x2 < a.x || a.y2 < b.y || b.y2 < a.y)
}

/// Screen-space rect to graph-space box, projecting both corners.
pub fn screen_rect_to_graph_box(rect: Rect, transform: &Transform) -> Bounds {
    let min = project(XYPosition::new(rect.x, rect.y), transform);
    let max = project(XYPosition::new(rect.x + rect.width, rect.y + rect.height), transform);
    Bounds::new(min.x, min.y, max.x, max.y)
}

/// Graph-space box currently visible in a pane of `width` x `height` pixels.
pub fn visible_box(transform: &Transform, width: f64, height: f64) -> Bounds {
    screen_rect_to_graph_box(Rect::new(0.0, 0.0, width, height), transform)
}

#[inline]
pub fn clamp_zoom(zoom: f64, min_zoom: f64, max_zoom: f64) -> f64 {
    zoom.clamp(min_zoom, max_zoom)
}

/// Transform that fits `bounds` into a `width` x `height` pane and centers it.
///
/// `padding` is a fraction of the bounds size reserved as margin. A
/// degenerate (zero-area) rect fits at `max_zoom`.
pub fn transform_for_bounds(
    bounds: Rect,
    width: f64,
    height: f64,
    min_zoom: f64,
    max_zoom: f64,
    padding: f64,
) -> Transform {
    let scale = 1.0 + padding;
    let x_zoom = width / (bounds.width * scale);
    let y_zoom = height / (bounds.height * scale);
    let fit = x_zoom.min(y_zoom);
    let zoom = if fit.is_finite() {
        clamp_zoom(fit, min_zoom, max_zoom)
    } else {
        max_zoom
    };

    let center_x = bounds.x + bounds.width / 2.0;
    let center_y = bounds.y + bounds.height / 2.0;

    Transform::new(width / 2.0 - center_x * zoom, height / 2.0 - center_y * zoom, zoom)
}

/// Translate needed so that graph point `focal` stays under screen point
/// `screen` at the new `zoom`.
pub fn transform_keeping_point(screen: XYPosition, focal: XYPosition, zoom: f64) -> Transform {
    Transform::new(screen.x - focal.x * zoom, screen.y - focal.y * zoom, zoom)
}

/// Keep a node box of size `dims` inside `extent`.
pub fn clamp_position(
    position: XYPosition,
    extent: Option<&CoordinateExtent>,
    dims: Option<Dimensions>,
) -> XYPosition {
    let Some(extent) = extent else {
        return position;
    };
    let dims = dims.unwrap_or_default();
    let min = extent.min();
    let max = extent.max();
    // A node larger than the extent pins to the min corner
    let max_x = (max.x - dims.width).max(min.x);
    let max_y = (max.y - dims.height).max(min.y);
    XYPosition::new(position.x.clamp(min.x, max_x), position.y.clamp(min.y, max_y))
}

/// Round a position to the nearest multiple of the grid.
pub fn snap_position(position: XYPosition, grid: [f64; 2]) -> XYPosition {
    XYPosition::new(
        grid[0] * (position.x / grid[0]).round(),
        grid[1] * (position.y / grid[1]).round(),
    )
}

/// Shift along one axis so `[lo, hi]` stays inside `[ext_lo, ext_hi]`.
///
/// When the visible span is larger than the extent the extent is centered.
fn constrain_axis(lo: f64, hi: f64, ext_lo: f64, ext_hi: f64) -> f64 {
    let d0 = lo - ext_lo;
    let d1 = hi - ext_hi;
    if d1 > d0 {
        (d0 + d1) / 2.0
    } else if d0 < 0.0 {
        d0
    } else {
        d1.max(0.0)
    }
}

/// Soft-clamp `transform` so the visible graph rect stays inside `extent`.
///
/// Only the translate is adjusted; the zoom is left untouched.
pub fn constrain_transform(
    transform: Transform,
    width: f64,
    height: f64,
    extent: Option<&CoordinateExtent>,
) -> Transform {
    let Some(extent) = extent else {
        return transform;
    };
    let visible = visible_box(&transform, width, height);
    let min = extent.min();
    let max = extent.max();

    let dx = constrain_axis(visible.x, visible.x2, min.x, max.x);
    let dy = constrain_axis(visible.y, visible.y2, min.y, max.y);

    Transform::new(
        transform.x + dx * transform.zoom,
        transform.y + dy * transform.zoom,
        transform.zoom,
    )
}
