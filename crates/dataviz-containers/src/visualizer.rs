use dataviz_graph::{DotGraph, RenderOptions};
use std::path::Path;

/// Structures that can describe their shape as a graph.
pub trait Visualizer {
    /// Nodes with labels plus every parent→child edge.
    fn dot_graph(&self) -> DotGraph;

    /// Renders the graph to an image through Graphviz.
    fn visualize(&self, path: &Path, options: &RenderOptions) -> anyhow::Result<()> {
        dataviz_graph::write_image(&self.dot_graph().to_dot(), path, options)
    }
}
