use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{Api, ListParams, ResourceExt},
    Client,
};

use crate::error::ProviderError;

/// Names of every namespace, in the order the API server returns them.
#[tracing::instrument(skip(client))]
pub async fn list_namespace_names(client: &Client) -> Result<Vec<String>, ProviderError> {
    let api: Api<Namespace> = Api::all(client.clone());
    let list = api.list(&ListParams::default()).await?;

    Ok(list.items.iter().map(|ns| ns.name_any()).collect())
}
