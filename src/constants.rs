//! Engine-wide constants.
//!
//! Centralizes default option values and interaction tuning so the option
//! defaults and the handlers agree on a single source.

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Default minimum zoom level
pub const MIN_ZOOM: f64 = 0.5;

/// Default maximum zoom level
pub const MAX_ZOOM: f64 = 2.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Multiplier applied by `zoom_in` / divisor applied by `zoom_out`
pub const ZOOM_STEP: f64 = 1.2;

/// Scroll delta (pixels) to zoom exponent: `factor = 2^(-delta_y * WHEEL_ZOOM_RATE)`
pub const WHEEL_ZOOM_RATE: f64 = 0.002;

/// Zoom factor applied by a double click on the pane
pub const DOUBLE_CLICK_ZOOM_FACTOR: f64 = 2.0;

/// Default scroll-pan speed multiplier
pub const PAN_ON_SCROLL_SPEED: f64 = 0.5;

/// Default padding fraction used by fit view
pub const FIT_VIEW_PADDING: f64 = 0.1;

// ============================================================================
// Grid & Hit Areas
// ============================================================================

/// Default snap grid
pub const SNAP_GRID: [f64; 2] = [15.0, 15.0];

/// Default edge updater hit radius in pixels
pub const EDGE_UPDATER_RADIUS: f64 = 10.0;

// ============================================================================
// Key Bindings
// ============================================================================

pub const DELETE_KEY: &str = "Backspace";
pub const SELECTION_KEY: &str = "Shift";
pub const MULTI_SELECTION_KEY: &str = "Meta";
pub const ZOOM_ACTIVATION_KEY: &str = "Meta";

// ============================================================================
// Type Registries
// ============================================================================

/// Type tag used when an element has no type or an unregistered one
pub const DEFAULT_TYPE: &str = "default";

pub const BUILTIN_NODE_TYPES: [&str; 3] = ["input", "default", "output"];

pub const BUILTIN_EDGE_TYPES: [&str; 4] = ["default", "straight", "step", "smoothstep"];

/// Prefix for generated edge ids
pub const EDGE_ID_PREFIX: &str = "flow__edge-";
