use k8s_openapi::api::core::v1::Pod;
use kube::{
    api::{Api, ListParams, ResourceExt},
    Client,
};

use crate::error::ProviderError;

/// Names of the pods in `namespace`, in the order the API server returns them.
#[tracing::instrument(skip(client))]
pub async fn list_pod_names(client: &Client, namespace: &str) -> Result<Vec<String>, ProviderError> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);
    let list = pods.list(&ListParams::default()).await?;

    Ok(list.items.iter().map(|pod| pod.name_any()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::fake::{forbidden, mock_client};
    use crate::dao::{ClusterProvider, KubeProvider};

    fn pod_list(names: &[&str]) -> String {
        let items: Vec<String> = names
            .iter()
            .map(|n| format!(r#"{{"metadata":{{"name":"{n}"}}}}"#))
            .collect();
        format!(
            r#"{{"apiVersion":"v1","kind":"PodList","metadata":{{"resourceVersion":"1"}},"items":[{}]}}"#,
            items.join(",")
        )
    }

    #[tokio::test]
    async fn test_list_pod_names_is_namespace_scoped() {
        let client = mock_client(|req| {
            assert_eq!(req.uri().path(), "/api/v1/namespaces/shop/pods");
            (http::StatusCode::OK, pod_list(&["cart-0", "checkout-1"]))
        });

        let names = list_pod_names(&client, "shop").await.unwrap();
        assert_eq!(names, vec!["cart-0", "checkout-1"]);
    }

    #[tokio::test]
    async fn test_kube_provider_lists_through_api() {
        let client = mock_client(|req| match req.uri().path() {
            "/api/v1/namespaces/locked/pods" => forbidden(),
            _ => (http::StatusCode::OK, pod_list(&["web-0"])),
        });
        let provider = KubeProvider::new(client);

        assert_eq!(provider.list_pods("open").await.unwrap(), vec!["web-0"]);
        assert!(provider.list_pods("locked").await.is_err());
    }
}
