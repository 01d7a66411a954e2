use async_trait::async_trait;
use kube::Client;

use crate::error::ProviderError;

pub mod namespace;
pub mod pod;

/// Read-only view of cluster state used to assemble a topology snapshot.
#[async_trait]
pub trait ClusterProvider: Send + Sync {
    async fn list_namespaces(&self) -> Result<Vec<String>, ProviderError>;

    async fn list_pods(&self, namespace: &str) -> Result<Vec<String>, ProviderError>;
}

/// [`ClusterProvider`] backed by the Kubernetes API.
#[derive(Clone)]
pub struct KubeProvider {
    client: Client,
}

impl KubeProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterProvider for KubeProvider {
    async fn list_namespaces(&self) -> Result<Vec<String>, ProviderError> {
        namespace::list_namespace_names(&self.client).await
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<String>, ProviderError> {
        pod::list_pod_names(&self.client, namespace).await
    }
}
