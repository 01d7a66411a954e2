//! DOT serialization of a [`Graph`] plus the debug line view shown next to
//! the rendered image.

use std::fmt::Write;

use serde::Serialize;

use super::identity::{dot_id, escaped_label};
use super::model::{Attribute, Graph, Node};
use crate::error::GraphError;

/// Rendered graph handed to the page layer. Built once per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DotGraph {
    pub name: String,
    pub dot: String,
    pub debug_lines: Vec<String>,
}

impl DotGraph {
    pub fn render(graph: &Graph) -> Result<Self, GraphError> {
        let dot = to_dot(graph)?;
        Ok(Self::from_dot(&graph.name, dot))
    }

    pub fn from_dot(name: &str, dot: String) -> Self {
        Self {
            name: name.to_string(),
            debug_lines: debug_lines(&dot),
            dot,
        }
    }
}

/// Serialize `graph` to DOT. Edges must only reference declared nodes.
pub fn to_dot(graph: &Graph) -> Result<String, GraphError> {
    validate(graph)?;

    let mut sections: Vec<String> = Vec::new();

    if !graph.attributes.is_empty() {
        let mut section = String::new();
        write_attributes(&mut section, &graph.attributes, 1)?;
        sections.push(section);
    }

    for namespace in &graph.namespaces {
        let mut section = String::new();
        writeln!(section, "\tsubgraph {} {{", dot_id(&namespace.cluster_name()))?;
        write_attributes(&mut section, &namespace.attributes, 2)?;
        write_nodes(&mut section, &namespace.nodes, 2)?;
        writeln!(section, "\t}}")?;
        sections.push(section);
    }

    if !graph.nodes.is_empty() {
        let mut section = String::new();
        write_nodes(&mut section, &graph.nodes, 1)?;
        sections.push(section);
    }

    if !graph.edges.is_empty() {
        let mut section = String::new();
        for edge in &graph.edges {
            writeln!(
                section,
                "\t{} {} {};",
                edge.from,
                graph.kind.edge_op(),
                edge.to
            )?;
        }
        sections.push(section);
    }

    let mut out = String::new();
    writeln!(out, "{} {} {{", graph.kind.keyword(), dot_id(&graph.name))?;
    out.push_str(&sections.join("\n"));
    out.push_str("}\n");
    Ok(out)
}

/// Human-readable approximation of `dot`: tabs become two spaces, runs of
/// blank lines collapse, and the text is split into lines.
pub fn debug_lines(dot: &str) -> Vec<String> {
    let mut text = dot.replace('\t', "  ");
    while text.contains("\n\n") {
        text = text.replace("\n\n", "\n");
    }
    text.lines().map(str::to_string).collect()
}

fn validate(graph: &Graph) -> Result<(), GraphError> {
    for edge in &graph.edges {
        for endpoint in [edge.from, edge.to] {
            if !graph.contains_node(endpoint) {
                return Err(GraphError::UndeclaredNode {
                    from: edge.from,
                    to: edge.to,
                    missing: endpoint,
                });
            }
        }
    }
    Ok(())
}

fn write_attributes(
    out: &mut String,
    attributes: &[Attribute],
    depth: usize,
) -> Result<(), GraphError> {
    let indent = "\t".repeat(depth);
    for attr in attributes {
        let value = if attr.key == "label" {
            escaped_label(&attr.value)
        } else {
            dot_id(&attr.value)
        };
        writeln!(out, "{indent}{}={};", dot_id(&attr.key), value)?;
    }
    Ok(())
}

fn write_nodes(out: &mut String, nodes: &[Node], depth: usize) -> Result<(), GraphError> {
    let indent = "\t".repeat(depth);
    for node in nodes {
        writeln!(out, "{indent}{} [label={}];", node.id, node.label)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::identity::pod_identity;
    use crate::graph::model::{GraphKind, Namespace};

    fn two_namespace_graph() -> Graph {
        let mut graph = Graph::new("pods", GraphKind::Undirected);
        graph.set_attribute("rankdir", "LR");
        let mut a = Namespace::new("a");
        a.add_pod("p1");
        a.add_pod("p2");
        graph.add_namespace(a);
        graph.add_namespace(Namespace::new("kube-system"));
        graph
    }

    #[test]
    fn test_undirected_cluster_layout() {
        let dot = to_dot(&two_namespace_graph()).unwrap();
        let expected = format!(
            "graph pods {{\n\
             \trankdir=LR;\n\
             \n\
             \tsubgraph cluster_a {{\n\
             \t\tlabel=\"a\";\n\
             \t\t{} [label=\"p1\"];\n\
             \t\t{} [label=\"p2\"];\n\
             \t}}\n\
             \n\
             \tsubgraph \"cluster_kube-system\" {{\n\
             \t\tlabel=\"kube-system\";\n\
             \t}}\n\
             }}\n",
            pod_identity("a", "p1"),
            pod_identity("a", "p2"),
        );
        assert_eq!(dot, expected);
    }

    #[test]
    fn test_attributes_precede_nodes() {
        let dot = to_dot(&two_namespace_graph()).unwrap();
        let rankdir = dot.find("rankdir").unwrap();
        let first_node = dot.find("[label=").unwrap();
        assert!(rankdir < first_node);
    }

    #[test]
    fn test_directed_edges() {
        let mut graph = Graph::new("service", GraphKind::Directed);
        graph.add_node(Node::placeholder(0));
        graph.add_node(Node::placeholder(1));
        graph.add_edge(0, 1);

        let dot = to_dot(&graph).unwrap();
        assert!(dot.starts_with("digraph service {\n"));
        assert!(dot.contains("\t0 [label=\"0\"];\n"));
        assert!(dot.contains("\t0 -> 1;\n"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_labels_never_emit_raw_quotes() {
        let mut graph = Graph::new("pods", GraphKind::Undirected);
        let mut ns = Namespace::new("odd\"ns");
        ns.add_pod("pod\"with\"quotes");
        graph.add_namespace(ns);

        let dot = to_dot(&graph).unwrap();
        assert!(dot.contains(r#"label="odd\"ns";"#));
        assert!(dot.contains(r#"[label="pod\"with\"quotes"];"#));
        assert!(dot.contains(r#"subgraph "cluster_odd\"ns" {"#));
    }

    #[test]
    fn test_undeclared_edge_is_structural_error() {
        let mut graph = Graph::new("service", GraphKind::Directed);
        graph.add_node(Node::placeholder(0));
        graph.add_edge(0, 42);

        let err = to_dot(&graph).unwrap_err();
        assert!(matches!(
            err,
            GraphError::UndeclaredNode {
                from: 0,
                to: 42,
                missing: 42
            }
        ));
        assert!(DotGraph::render(&graph).is_err());
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new("pods", GraphKind::Undirected);
        assert_eq!(to_dot(&graph).unwrap(), "graph pods {\n}\n");
    }

    #[test]
    fn test_debug_lines_expand_tabs_and_collapse_blank_lines() {
        let lines = debug_lines("graph g {\n\ta;\n\n\n\n\tb;\n}\n");
        assert_eq!(lines, vec!["graph g {", "  a;", "  b;", "}"]);
    }

    #[test]
    fn test_debug_lines_of_rendered_graph() {
        let rendered = DotGraph::render(&two_namespace_graph()).unwrap();
        assert_eq!(rendered.name, "pods");
        assert!(!rendered.debug_lines.is_empty());
        for line in &rendered.debug_lines {
            assert!(!line.contains('\t'));
            assert!(!line.is_empty());
        }
        assert!(rendered.debug_lines.contains(&"    label=\"a\";".to_string()));
    }
}
