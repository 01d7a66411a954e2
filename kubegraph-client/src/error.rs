use thiserror::Error;

/// Failures while turning a graph into DOT text. Fatal for the request.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("edge {from} -> {to} references undeclared node {missing}")]
    UndeclaredNode { from: i64, to: i64, missing: i64 },

    #[error("failed to write dot output: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Failures talking to the cluster. Recovered by the topology builder.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("kubernetes api request failed: {0}")]
    Kube(#[from] kube::Error),

    #[error("failed to load kubeconfig: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("failed to infer cluster config: {0}")]
    InferConfig(#[from] kube::config::InferConfigError),
}
