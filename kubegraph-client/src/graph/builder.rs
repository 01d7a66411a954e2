use tracing::{debug, error, info};

use super::model::{Graph, GraphKind, Namespace, Node};
use crate::dao::ClusterProvider;

pub const PODS_GRAPH: &str = "pods";
pub const SERVICE_GRAPH: &str = "service";

/// Snapshot of every namespace and its pods as one undirected graph.
///
/// Listing failures never abort the snapshot: a failed namespace listing
/// yields an empty graph, a failed pod listing leaves that namespace's
/// sub-cluster empty. Both are logged.
#[tracing::instrument(skip(provider))]
pub async fn build_pods_graph<P>(provider: &P) -> Graph
where
    P: ClusterProvider + ?Sized,
{
    let mut graph = Graph::new(PODS_GRAPH, GraphKind::Undirected);
    graph.set_attribute("rankdir", "LR");

    let namespaces = match provider.list_namespaces().await {
        Ok(namespaces) => namespaces,
        Err(e) => {
            error!(error = %e, "could not list namespaces");
            return graph;
        }
    };

    for name in namespaces {
        let mut namespace = Namespace::new(&name);

        match provider.list_pods(&name).await {
            Ok(pods) => {
                for pod in &pods {
                    namespace.add_pod(pod);
                }
            }
            Err(e) => error!(namespace = %name, error = %e, "could not list pods"),
        }

        debug!(
            namespace = %name,
            id = namespace.id,
            pods = namespace.nodes.len(),
            "added namespace"
        );
        graph.add_namespace(namespace);
    }

    info!(
        namespaces = graph.namespaces.len(),
        pods = graph.node_count(),
        "built pods graph"
    );
    graph
}

/// Minimal two-node topology for a single service.
pub fn build_service_graph(service_name: &str) -> Graph {
    let mut graph = Graph::new(SERVICE_GRAPH, GraphKind::Directed);
    graph.add_node(Node::placeholder(0));
    graph.add_node(Node::placeholder(1));
    graph.add_edge(0, 1);

    debug!(service = %service_name, "built service graph");
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::fake::FakeProvider;

    #[tokio::test]
    async fn test_pods_grouped_per_namespace() {
        let provider = FakeProvider::new(&[("a", Some(vec!["p1", "p2"])), ("b", Some(vec![]))]);

        let graph = build_pods_graph(&provider).await;

        assert_eq!(graph.name, "pods");
        assert_eq!(graph.kind, GraphKind::Undirected);
        assert_eq!(graph.namespaces.len(), 2);
        assert_eq!(graph.namespace("a").unwrap().nodes.len(), 2);
        assert_eq!(graph.namespace("b").unwrap().nodes.len(), 0);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.attribute("rankdir"), Some("LR"));
    }

    #[tokio::test]
    async fn test_namespace_order_follows_provider() {
        let provider = FakeProvider::new(&[("zeta", Some(vec![])), ("alpha", Some(vec!["x"]))]);

        let graph = build_pods_graph(&provider).await;
        let names: Vec<&str> = graph.namespaces.iter().map(|ns| ns.name.as_str()).collect();

        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(graph.namespaces[0].cluster_name(), "cluster_zeta");
    }

    #[tokio::test]
    async fn test_failed_pod_listing_is_isolated() {
        let provider = FakeProvider::new(&[
            ("a", Some(vec!["p1", "p2"])),
            ("b", None),
            ("c", Some(vec!["p3"])),
        ]);

        let graph = build_pods_graph(&provider).await;

        assert_eq!(graph.namespaces.len(), 3);
        assert_eq!(graph.namespace("a").unwrap().nodes.len(), 2);
        assert!(graph.namespace("b").unwrap().nodes.is_empty());
        assert_eq!(graph.namespace("c").unwrap().nodes.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_namespace_listing_yields_empty_graph() {
        let provider = FakeProvider::unreachable();

        let graph = build_pods_graph(&provider).await;

        assert_eq!(graph.name, "pods");
        assert!(graph.namespaces.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.attribute("rankdir"), Some("LR"));
    }

    #[tokio::test]
    async fn test_same_pod_name_in_two_namespaces_gets_two_nodes() {
        let provider = FakeProvider::new(&[("a", Some(vec!["web"])), ("b", Some(vec!["web"]))]);

        let graph = build_pods_graph(&provider).await;
        let a = &graph.namespace("a").unwrap().nodes[0];
        let b = &graph.namespace("b").unwrap().nodes[0];

        assert_ne!(a.id, b.id);
        assert_eq!(a.label, b.label);
    }

    #[test]
    fn test_service_graph_shape() {
        for name in ["checkout", "we\"ird", ""] {
            let graph = build_service_graph(name);
            assert_eq!(graph.kind, GraphKind::Directed);
            assert_eq!(graph.nodes.len(), 2);
            assert_eq!(graph.edges.len(), 1);
            assert_eq!((graph.edges[0].from, graph.edges[0].to), (0, 1));
        }
    }
}
