use super::identity::{escaped_label, identity, pod_identity};

/// Prefix that makes Graphviz draw a subgraph as a bounded cluster.
pub const CLUSTER_PREFIX: &str = "cluster_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    /// Service view: nodes joined by `->` edges.
    Directed,
    /// Cluster view: pods grouped per namespace, no edges.
    Undirected,
}

impl GraphKind {
    pub fn keyword(self) -> &'static str {
        match self {
            GraphKind::Directed => "digraph",
            GraphKind::Undirected => "graph",
        }
    }

    pub fn edge_op(self) -> &'static str {
        match self {
            GraphKind::Directed => "->",
            GraphKind::Undirected => "--",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A graph node. `label` is already DOT-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: i64,
    pub label: String,
}

impl Node {
    pub fn pod(namespace: &str, name: &str) -> Self {
        Self {
            id: pod_identity(namespace, name),
            label: escaped_label(name),
        }
    }

    pub fn placeholder(id: i64) -> Self {
        Self {
            id,
            label: escaped_label(&id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: i64,
    pub to: i64,
}

/// One namespace of the snapshot, drawn as a labeled sub-cluster holding its
/// pod nodes in the order they were listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub id: i64,
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub nodes: Vec<Node>,
}

impl Namespace {
    pub fn new(name: &str) -> Self {
        Self {
            id: identity(name),
            name: name.to_string(),
            attributes: vec![Attribute::new("label", name)],
            nodes: Vec::new(),
        }
    }

    pub fn cluster_name(&self) -> String {
        format!("{CLUSTER_PREFIX}{}", self.name)
    }

    pub fn add_pod(&mut self, pod_name: &str) {
        self.nodes.push(Node::pod(&self.name, pod_name));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    pub name: String,
    pub kind: GraphKind,
    pub attributes: Vec<Attribute>,
    pub namespaces: Vec<Namespace>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(name: &str, kind: GraphKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            attributes: Vec::new(),
            namespaces: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Set a graph-level attribute, replacing an earlier value for `key`.
    pub fn set_attribute(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|a| a.key == key) {
            Some(existing) => existing.value = value.to_string(),
            None => self.attributes.push(Attribute::new(key, value)),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    pub fn add_namespace(&mut self, namespace: Namespace) {
        self.namespaces.push(namespace);
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, from: i64, to: i64) {
        self.edges.push(Edge { from, to });
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    /// Total node count, top-level nodes plus every namespace's pods.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
            + self
                .namespaces
                .iter()
                .map(|ns| ns.nodes.len())
                .sum::<usize>()
    }

    pub fn contains_node(&self, id: i64) -> bool {
        self.nodes.iter().any(|n| n.id == id)
            || self
                .namespaces
                .iter()
                .any(|ns| ns.nodes.iter().any(|n| n.id == id))
    }
}
