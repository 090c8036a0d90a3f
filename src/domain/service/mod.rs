pub mod graph;
pub use graph::*;

pub mod registry;
pub use registry::*;
