//! Pure per-frame visual encodings: (entity, view-state snapshot) -> style.

pub mod color;
pub mod edge;
pub mod node;
pub mod size;

pub use color::ColorMap;
pub use edge::{EdgeView, Endpoint, reduce_edge};
pub use node::{NodeStyle, NodeView, reduce_node};
