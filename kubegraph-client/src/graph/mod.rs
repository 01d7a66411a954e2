//! Topology graph model, its assembly from cluster state, and DOT output.

use tracing::{error, info};

use crate::dao::ClusterProvider;
use crate::error::GraphError;

pub mod builder;
pub mod dot;
pub mod identity;
pub mod model;

pub use builder::{build_pods_graph, build_service_graph, PODS_GRAPH, SERVICE_GRAPH};
pub use dot::DotGraph;
pub use model::{Graph, GraphKind, Namespace, Node};

/// Render the two-node graph for `service_name`.
#[tracing::instrument]
pub fn load_service(service_name: &str) -> Result<DotGraph, GraphError> {
    let graph = build_service_graph(service_name);
    let rendered = DotGraph::render(&graph).map_err(|e| {
        error!(error = %e, "could not render graph into dot format");
        e
    })?;

    info!(service = %service_name, "loaded service meta-data");
    Ok(rendered)
}

/// Render a snapshot of every namespace and its pods. Never fails: listing
/// errors degrade the graph, and a render error degrades to an empty graph.
#[tracing::instrument(skip(provider))]
pub async fn load_pods<P>(provider: &P) -> DotGraph
where
    P: ClusterProvider + ?Sized,
{
    let graph = build_pods_graph(provider).await;

    match DotGraph::render(&graph) {
        Ok(rendered) => rendered,
        Err(e) => {
            error!(error = %e, "could not render pods graph into dot format");
            DotGraph::from_dot(PODS_GRAPH, format!("graph {PODS_GRAPH} {{\n}}\n"))
        }
    }
}
