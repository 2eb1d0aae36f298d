pub mod traits;
pub mod undirected;
pub mod without_edge;
pub mod generators;

pub use traits::{Graph, MutableGraph, NodeId};
pub use undirected::UndirectedGraph;
pub use without_edge::WithoutEdge;
