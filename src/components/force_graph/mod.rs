//! Canvas graph renderer on top of the `force_graph` simulation.

mod component;
mod render;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use state::Layout;
pub use types::{CategorySource, Encoding, GraphData};
