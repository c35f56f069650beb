//! State, geometry and interaction engine for node/edge flow diagrams.
//!
//! The crate keeps a graph of positioned nodes and typed edges, a pan/zoom
//! viewport and the live gesture state (node drag, box selection, pane pan,
//! connection in progress). A renderer reads the state; a UI layer feeds
//! pointer, scroll and keyboard intents through [`FlowStore::dispatch`].
//!
//! ## Modules
//!
//! - `geometry` - Pure coordinate math (project/unproject, boxes, fit view)
//! - `spatial_index` - R-tree over node bounds for selection and hit testing
//! - `graph` - Authoritative node and edge collections
//! - `viewport` - Transform, zoom bounds and translate extent
//! - `policy` - Connection rules, key predicates, scroll interpretation
//! - `input` - Gesture tracks and intent handlers
//! - `flow` - The `FlowStore` aggregate and its imperative API
//! - `shared` - Lock-guarded handle with change notification

pub mod config;
pub mod constants;
pub mod error;
pub mod flow;
pub mod geometry;
pub mod graph;
pub mod input;
pub mod logging;
pub mod perf;
pub mod policy;
pub mod shared;
pub mod spatial_index;
pub mod types;
pub mod viewport;

pub use config::FlowOptions;
pub use error::{FlowError, FlowResult};
pub use flow::FlowStore;
pub use shared::SharedFlow;
pub use types::*;
