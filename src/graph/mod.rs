//! The heterogeneous text graph: nodes, edges, and export.

pub mod edge;
pub mod export;
pub mod graph;
pub mod node;

pub use edge::{Edge, EdgeKind};
pub use export::{to_gexf, PathExport, PathExportEntry, PathExportParameters};
pub use graph::Graph;
pub use node::{Node, NodeData, NodeId, NodeKind};
