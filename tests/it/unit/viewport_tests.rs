//! Viewport controller tests.

use crate::helpers::approx_eq;
use flowcanvas::types::{CoordinateExtent, FitViewParams, Rect, Transform, XYPosition};
use flowcanvas::viewport::Viewport;

fn measured(min_zoom: f64, max_zoom: f64) -> Viewport {
    let mut vp = Viewport::new(min_zoom, max_zoom, None);
    vp.set_dimensions(400.0, 400.0);
    vp
}

#[test]
fn test_zoom_always_within_bounds() {
    let mut vp = measured(0.5, 2.0);
    for level in [0.0001, 0.3, 0.5, 1.0, 1.7, 2.0, 50.0] {
        let t = vp.zoom_to(level);
        assert!((0.5..=2.0).contains(&t.zoom), "zoom {} out of range", t.zoom);
    }
    for _ in 0..20 {
        vp.zoom_in();
    }
    assert_eq!(vp.zoom(), 2.0);
    for _ in 0..40 {
        vp.zoom_out();
    }
    assert_eq!(vp.zoom(), 0.5);
}

#[test]
fn test_scale_by_keeps_focal_point_when_unclamped() {
    let mut vp = measured(0.1, 10.0);
    let focal = XYPosition::new(250.0, 90.0);
    let before = vp.project(focal);
    vp.scale_by(1.5, focal);
    let after = vp.project(focal);
    assert!(approx_eq(before.x, after.x));
    assert!(approx_eq(before.y, after.y));
}

#[test]
fn test_fit_bounds_single_node_scenario() {
    let mut vp = measured(0.5, 10.0);
    let t = vp.fit_bounds(Rect::new(100.0, 100.0, 50.0, 50.0), &FitViewParams::with_padding(0.0));
    assert!(approx_eq(t.zoom, 8.0));
    assert!(approx_eq(t.x, -800.0));
    assert!(approx_eq(t.y, -800.0));

    // Node centre lands on the pane centre
    let centre = vp.unproject(XYPosition::new(125.0, 125.0));
    assert!(approx_eq(centre.x, 200.0));
    assert!(approx_eq(centre.y, 200.0));
}

#[test]
fn test_fit_bounds_params_only_narrow_zoom_bounds() {
    let rect = Rect::new(100.0, 100.0, 50.0, 50.0);
    let wide = FitViewParams {
        padding: Some(0.0),
        max_zoom: Some(10.0),
        ..FitViewParams::default()
    };
    let mut vp = measured(0.5, 2.0);
    assert_eq!(vp.fit_bounds(rect, &wide).zoom, 2.0);

    let narrow = FitViewParams {
        max_zoom: Some(4.0),
        ..wide
    };
    let mut vp = measured(0.5, 10.0);
    assert_eq!(vp.fit_bounds(rect, &narrow).zoom, 4.0);
}

#[test]
fn test_fit_bounds_respects_max_zoom() {
    let mut vp = measured(0.5, 2.0);
    let t = vp.fit_bounds(Rect::new(100.0, 100.0, 50.0, 50.0), &FitViewParams::with_padding(0.0));
    assert_eq!(t.zoom, 2.0);
}

#[test]
fn test_visible_rect_follows_transform() {
    let mut vp = measured(0.5, 2.0);
    vp.set_transform(Transform::new(-100.0, 50.0, 2.0));
    assert_eq!(vp.visible_rect(), Rect::new(50.0, -25.0, 200.0, 200.0));
}

#[test]
fn test_pan_inside_extent_is_never_rejected() {
    let mut vp = Viewport::new(0.5, 2.0, Some(CoordinateExtent::new([0.0, 0.0], [1000.0, 1000.0])));
    vp.set_dimensions(400.0, 400.0);
    vp.pan_by(XYPosition::new(250.0, 250.0));
    // Pushed back against the top-left corner
    assert_eq!(vp.transform(), Transform::new(0.0, 0.0, 1.0));
}

#[test]
fn test_swapped_zoom_bounds_are_ordered() {
    let mut vp = Viewport::default();
    vp.set_zoom_bounds(3.0, 1.0);
    assert_eq!(vp.zoom_bounds(), (1.0, 3.0));
}

#[test]
fn test_setting_extent_pulls_transform_inside() {
    let mut vp = measured(0.5, 2.0);
    vp.pan_by(XYPosition::new(250.0, 250.0));
    assert_eq!(vp.transform(), Transform::new(250.0, 250.0, 1.0));

    vp.set_translate_extent(Some(CoordinateExtent::new([0.0, 0.0], [1000.0, 1000.0])));

    assert_eq!(vp.transform(), Transform::new(0.0, 0.0, 1.0));
}
