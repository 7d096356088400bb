//! Graphviz output: DOT serialization and image rendering through the Graphviz tools.

use std::fmt::Write as _;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use clap::ValueEnum;

use crate::depgraph_error;
use crate::error::{DepGraphError, DepGraphResult};
use crate::graph::DependencyGraph;
use crate::logging::log_info;

/// Graphviz layout program used to position the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LayoutEngine {
    #[default]
    Dot,
    Neato,
    Fdp,
    Sfdp,
    Circo,
    Twopi,
}

impl LayoutEngine {
    pub fn program(&self) -> &'static str {
        match self {
            LayoutEngine::Dot => "dot",
            LayoutEngine::Neato => "neato",
            LayoutEngine::Fdp => "fdp",
            LayoutEngine::Sfdp => "sfdp",
            LayoutEngine::Circo => "circo",
            LayoutEngine::Twopi => "twopi",
        }
    }
}

fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Serialize the graph as Graphviz DOT text.
pub fn to_dot(graph: &DependencyGraph) -> String {
    let mut output = String::from("digraph issues {\n");
    let _ = writeln!(output, "  label=\"{}\";", escape(graph.title()));
    output.push_str("  node [style=filled, penwidth=2.0];\n\n");

    for node in graph.nodes() {
        let mut attrs = vec![format!("label=\"{}\"", escape(&node.label()))];
        if let Some(color) = node.fill_color {
            attrs.push(format!("fillcolor={}", color.as_str()));
        }
        if let Some(shape) = node.shape.as_graphviz() {
            attrs.push(format!("shape={}", shape));
        }
        let _ = writeln!(output, "  \"{}\" [{}];", escape(&node.key), attrs.join(", "));
    }

    output.push('\n');

    for edge in graph.edges() {
        let _ = writeln!(
            output,
            "  \"{}\" -> \"{}\" [label=\"{}\", color={}, penwidth={:.1}];",
            escape(edge.source),
            escape(edge.target),
            escape(edge.kind.label()),
            edge.kind.color(),
            edge.kind.penwidth()
        );
    }

    output.push_str("}\n");
    output
}

/// Writes a graph to disk, choosing the output format from the file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphvizRenderer {
    pub layout: LayoutEngine,
}

impl GraphvizRenderer {
    pub fn new(layout: LayoutEngine) -> Self {
        Self { layout }
    }

    /// `.dot` / `.gv` get the DOT source; anything else is handed to Graphviz as `-T<ext>`.
    pub fn render(&self, graph: &DependencyGraph, path: &Path) -> DepGraphResult<()> {
        let format = output_format(path)?;
        let dot = to_dot(graph);

        log_info(&format!(
            "Rendering {} nodes / {} edges to {} ({}, {})",
            graph.node_count(),
            graph.edge_count(),
            path.display(),
            self.layout.program(),
            format
        ));

        if format == "dot" || format == "gv" {
            fs::write(path, dot)?;
            return Ok(());
        }

        let program = self.layout.program();
        let mut child = Command::new(program)
            .arg(format!("-T{}", format))
            .arg("-o")
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => DepGraphError::GraphvizNotFound(program.to_string()),
                _ => DepGraphError::IoError(e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(depgraph_error!(
                RenderError,
                "{} exited with {}: {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        Ok(())
    }
}

fn output_format(path: &Path) -> DepGraphResult<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| {
            depgraph_error!(
                InvalidInput,
                "Cannot tell the image format of '{}', add an extension such as .png or .svg",
                path.display()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeKind, NodeShape, StatusColor};

    fn sample() -> DependencyGraph {
        let mut graph = DependencyGraph::with_start("DEMO-0");
        graph.ensure_node("DEMO-1", Some("Say \"hi\""));
        graph.add_edge("DEMO-0", "DEMO-1", EdgeKind::Membership);
        graph.add_edge("DEMO-1", "DEMO-2", EdgeKind::Link("blocks".to_string()));
        graph.node_mut("DEMO-0").unwrap().shape = NodeShape::Epic;
        graph.node_mut("DEMO-1").unwrap().fill_color = Some(StatusColor::Yellow);
        graph
    }

    #[test]
    fn test_dot_contains_nodes_and_edges() {
        let dot = to_dot(&sample());

        assert!(dot.starts_with("digraph issues {"));
        assert!(dot.contains("label=\"Dependency Graph for DEMO-0\";"));
        assert!(dot.contains("\"DEMO-0\" [label=\"DEMO-0\", shape=folder];"));
        assert!(dot.contains("\"DEMO-1\" [label=\"DEMO-1\\nSay \\\"hi\\\"\", fillcolor=yellow];"));
        assert!(dot.contains(
            "\"DEMO-0\" -> \"DEMO-1\" [label=\"epic\", color=violet, penwidth=0.5];"
        ));
        assert!(dot.contains(
            "\"DEMO-1\" -> \"DEMO-2\" [label=\"blocks\", color=black, penwidth=1.0];"
        ));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_layout_program_names() {
        assert_eq!(LayoutEngine::default().program(), "dot");
        assert_eq!(LayoutEngine::Neato.program(), "neato");
    }

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(output_format(Path::new("graph.PNG")).unwrap(), "png");
        assert_eq!(output_format(Path::new("out/graph.svg")).unwrap(), "svg");
        assert!(matches!(
            output_format(Path::new("graph")),
            Err(DepGraphError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_render_dot_file_without_graphviz() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.dot");

        GraphvizRenderer::default().render(&sample(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_dot(&sample()));
    }
}
